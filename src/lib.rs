pub mod args;
pub mod auth;
pub mod capture;
pub mod error;
pub mod model;
pub mod storage;

pub mod controller {
    pub mod editor;
    pub mod ocr;
    pub mod register;
}

pub mod mvu {
    pub mod pipeline;
    pub mod runtime;
}

pub mod view {
    pub mod correction;
    pub mod index;
}
