#[macro_use]
extern crate tracing;

mod client;
mod error;
pub mod health;
pub mod poller;
pub mod scale;
pub mod session;

pub use client::{
    Controller,
    ControllerClient,
    Endpoint,
};
pub use error::{
    AuthError,
    ClientError,
    FetchError,
    PollError,
    SchemaError,
};
pub use health::Sample;
pub use poller::{
    PollStatus,
    Poller,
    Reading,
};
pub use scale::{
    PeakStrategy,
    Percentages,
    ScaleTracker,
    traffic_rate,
};
pub use session::{
    Credentials,
    SessionManager,
};
