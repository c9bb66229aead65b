pub mod camera;
pub mod file;

pub use camera::*;
pub use file::*;

use crate::error::AppError;

/// A single still image normalized to raw bytes plus MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Outcome of one acquisition attempt. Cancellation and device failure are
/// ordinary variants, not thrown errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Image(ImageBlob),
    Cancelled,
    DeviceError(String),
}

#[derive(Default)]
enum PickerMode {
    #[default]
    Idle,
    FilePending,
    Camera(CameraSession),
}

/// Obtains a single still image from a file picker or a camera device.
/// The two modes are mutually exclusive; the camera handle is the one
/// exclusive resource and is released on every exit path.
#[derive(Default)]
pub struct ImageSource {
    mode: PickerMode,
}

impl ImageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.mode, PickerMode::Idle)
    }

    #[must_use]
    pub fn camera_state(&self) -> Option<CameraState> {
        match &self.mode {
            PickerMode::Camera(session) => Some(session.state()),
            _ => None,
        }
    }

    /// Enter file mode.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Device` if the camera is open; the pickers are
    /// mutually exclusive.
    pub fn begin_file(&mut self) -> Result<(), AppError> {
        match self.mode {
            PickerMode::Camera(_) => Err(AppError::Device(
                "file picker requested while camera is open".into(),
            )),
            _ => {
                self.mode = PickerMode::FilePending;
                Ok(())
            }
        }
    }

    /// Resolve a pending file pick; a `None` from the picker is a
    /// cancellation. Either way the source returns to idle.
    pub fn finish_file(&mut self, picker: &mut dyn FilePicker) -> CaptureOutcome {
        if !matches!(self.mode, PickerMode::FilePending) {
            return CaptureOutcome::DeviceError("no file pick pending".into());
        }
        self.mode = PickerMode::Idle;
        match picker.pick() {
            Some(blob) => CaptureOutcome::Image(blob),
            None => CaptureOutcome::Cancelled,
        }
    }

    /// Enter camera mode and start streaming.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Device` if a file pick is pending, a camera is
    /// already open, or the platform denies the device.
    pub fn begin_camera(&mut self, access: &mut dyn CameraAccess) -> Result<(), AppError> {
        match &self.mode {
            PickerMode::FilePending => Err(AppError::Device(
                "camera requested while a file pick is pending".into(),
            )),
            PickerMode::Camera(_) => Err(AppError::Device("camera already open".into())),
            PickerMode::Idle => {
                let mut session = CameraSession::new();
                session.open(access)?;
                self.mode = PickerMode::Camera(session);
                Ok(())
            }
        }
    }

    /// Snapshot the streaming preview into a still; the device is released
    /// on success and on failure.
    pub fn capture_frame(&mut self) -> CaptureOutcome {
        let PickerMode::Camera(session) = &mut self.mode else {
            return CaptureOutcome::DeviceError("camera is not open".into());
        };
        match session.capture() {
            Ok(blob) => CaptureOutcome::Image(blob),
            Err(e) => {
                self.mode = PickerMode::Idle;
                CaptureOutcome::DeviceError(e.to_string())
            }
        }
    }

    /// Discard a captured frame and stream again.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Device` when no capture is pending or when the
    /// device cannot be re-acquired (source returns to idle).
    pub fn retake(&mut self, access: &mut dyn CameraAccess) -> Result<(), AppError> {
        let result = match &mut self.mode {
            PickerMode::Camera(session) => session.retake(access),
            _ => return Err(AppError::Device("camera is not open".into())),
        };
        if result.is_err() {
            self.mode = PickerMode::Idle;
        }
        result
    }

    /// Abandon whichever mode is active, releasing any device handle.
    pub fn cancel(&mut self) {
        if let PickerMode::Camera(session) = &mut self.mode {
            session.cancel();
        }
        self.mode = PickerMode::Idle;
    }

    /// Confirmed capture or completed pick: return to idle. The camera
    /// handle was already released at capture time.
    pub fn reset(&mut self) {
        self.cancel();
    }
}
