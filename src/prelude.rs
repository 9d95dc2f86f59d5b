pub use crate::galaxy::{GalaxySettings, GalaxySettingsDraft, GalaxyStats};
pub use galaxy_points::{GalaxyParameters, Rgb};
