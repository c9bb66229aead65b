use crate::capture::ImageBlob;
use crate::error::AppError;

/// Fallback frame size when the device does not report a native resolution.
pub const DEFAULT_CAPTURE_WIDTH: u32 = 1280;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 720;
/// Fixed JPEG encode quality for snapshots.
pub const JPEG_QUALITY: f32 = 0.92;

/// An open handle to a video capture device. Implementations sit at the
/// platform boundary; the session below owns the lifecycle.
pub trait CameraDevice: Send {
    /// Native capture resolution, if the device reports one.
    fn resolution(&self) -> Option<(u32, u32)>;

    /// Snapshot the current video frame as JPEG bytes at the given size and
    /// quality.
    fn snapshot_jpeg(&mut self, width: u32, height: u32, quality: f32)
    -> Result<Vec<u8>, String>;

    /// Stop every active track on the device. Must be idempotent.
    fn stop_all_tracks(&mut self);

    fn has_active_tracks(&self) -> bool;
}

/// Platform surface that grants camera devices.
pub trait CameraAccess: Send {
    /// Request an exclusive device handle, rear-facing preferred. An `Err`
    /// means permission was denied or no device exists.
    fn request(&mut self, prefer_rear: bool) -> Result<Box<dyn CameraDevice>, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Closed,
    Requesting,
    Streaming,
    Captured,
}

/// Single-device camera session: `Closed -> Requesting -> Streaming ->
/// Captured -> (Closed | Streaming via retake)`. The device handle is
/// released on capture, cancel, retake and teardown, whichever comes first.
pub struct CameraSession {
    state: CameraState,
    device: Option<Box<dyn CameraDevice>>,
}

impl Default for CameraSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CameraState::Closed,
            device: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> CameraState {
        self.state
    }

    #[must_use]
    pub fn device_open(&self) -> bool {
        self.device.is_some()
    }

    /// Acquire the device and start streaming a preview. A denial reports
    /// `Device` and returns the session to `Closed`; it is never retried
    /// silently.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Device` if the platform denies the camera or no
    /// device is available, or if a handle is already open.
    pub fn open(&mut self, access: &mut dyn CameraAccess) -> Result<(), AppError> {
        if self.device.is_some() {
            return Err(AppError::Device("camera already open".into()));
        }
        self.state = CameraState::Requesting;
        match access.request(true) {
            Ok(device) => {
                self.device = Some(device);
                self.state = CameraState::Streaming;
                Ok(())
            }
            Err(reason) => {
                self.state = CameraState::Closed;
                Err(AppError::Device(reason))
            }
        }
    }

    /// Snapshot the current frame as a JPEG still and release the device.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Device` when not streaming or when the snapshot
    /// fails; the handle is released either way.
    pub fn capture(&mut self) -> Result<ImageBlob, AppError> {
        if self.state != CameraState::Streaming {
            return Err(AppError::Device("capture requested while not streaming".into()));
        }
        let Some(mut device) = self.device.take() else {
            self.state = CameraState::Closed;
            return Err(AppError::Device("no open device".into()));
        };

        let (width, height) = device
            .resolution()
            .unwrap_or((DEFAULT_CAPTURE_WIDTH, DEFAULT_CAPTURE_HEIGHT));
        let shot = device.snapshot_jpeg(width, height, JPEG_QUALITY);
        device.stop_all_tracks();

        match shot {
            Ok(bytes) => {
                self.state = CameraState::Captured;
                Ok(ImageBlob {
                    bytes,
                    mime_type: "image/jpeg".to_string(),
                })
            }
            Err(reason) => {
                self.state = CameraState::Closed;
                Err(AppError::Device(reason))
            }
        }
    }

    /// Discard the captured frame and re-acquire the device for another try.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Device` when not in `Captured`, or when
    /// re-acquisition is denied (session returns to `Closed`).
    pub fn retake(&mut self, access: &mut dyn CameraAccess) -> Result<(), AppError> {
        if self.state != CameraState::Captured {
            return Err(AppError::Device("retake requested without a capture".into()));
        }
        self.release();
        self.open(access)
    }

    /// Stop all tracks and drop the handle; session returns to `Closed`.
    pub fn cancel(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.stop_all_tracks();
        }
        self.state = CameraState::Closed;
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        // Teardown is a release path like any other.
        self.release();
    }
}
