//! `embedded-hal` drivers for the robot's actuators.
//!
//! | Driver          | Port(s)                 | Hardware                 |
//! |-----------------|-------------------------|--------------------------|
//! | `hbridge`       | MotorPort, OutputPort   | PWM + direction pin      |
//! | `solenoid`      | OutputPort              | two-coil pneumatic valve |

pub mod hbridge;
pub mod solenoid;
