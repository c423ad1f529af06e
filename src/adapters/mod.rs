//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                    |
//! |-------------|----------------|--------------------------------|
//! | `hardware`  | RobotHardware  | drive base, intake, lift       |
//! | `log_sink`  | EventSink      | `log` facade                   |
//! | `time`      | Clock          | `std::time::Instant` / manual  |

pub mod hardware;
pub mod log_sink;
pub mod time;
