use serde::{Serialize, Serializer};

/// Operating status label written next to every position update.
///
/// The ingestion never derives the status from the data, one label is
/// chosen at startup and reported with every fix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// The vehicle is parked and free.
    Idle,
    /// Somebody is riding the vehicle.
    InUse,
    /// The vehicle is driving.
    #[default]
    InMotion,
    /// The vehicle is on its way to a pickup point.
    Dispatching,
}

impl Status {
    /// Human readable label as stored in the position document.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::InUse => "in use",
            Status::InMotion => "in motion",
            Status::Dispatching => "dispatching",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialized as its [`label`](Status::label).
impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
