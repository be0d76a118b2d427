//! Control Elgato Key Lights over their local HTTP API.
//!
//! ```no_run
//! use elgato_keylight::{Config, KeyLightClient};
//!
//! # async fn run() -> elgato_keylight::Result<()> {
//! let config = Config::default();
//! let mut client = KeyLightClient::new(&config)?;
//! client.set_value("+10")?;
//! for ip in &config.ips {
//!     client.set_brightness(*ip).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod adjust;
pub mod config;
pub mod error;
pub mod keylight;

pub use adjust::{Adjustment, Field, BRIGHTNESS_RANGE, TEMPERATURE_RANGE};
pub use config::Config;
pub use error::{ElgatoError, Result};
pub use keylight::{AccessoryInfo, KeyLightClient, Light, Status};
