//! Testing utilities and harness for snapsheet

mod doubles;
mod scheduler;
pub mod testing;

pub use doubles::{
    FakeDocument, NavigationCall, RecordingListeners, RecordingNavigator, RecordingSurface,
    SurfaceCall,
};
pub use scheduler::ManualScheduler;
pub use testing::*;

pub mod prelude {
    pub use crate::doubles::*;
    pub use crate::scheduler::ManualScheduler;
    pub use crate::testing::*;
}
