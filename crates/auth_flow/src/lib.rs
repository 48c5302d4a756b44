//! State machines for the Aqari credential flows: login with step-up device
//! verification, signup with email verification, and the shared 6-digit code
//! entry, resend cooldown, and device fingerprint pieces. Everything here is
//! pure state; the web app wires it to signals, timers, and the gateway
//! client.

mod code;
mod cooldown;
mod fingerprint;
mod flow;

pub use code::{CodeBuffer, CODE_LENGTH};
pub use cooldown::{ResendCooldown, RESEND_COOLDOWN_SECS};
pub use fingerprint::DeviceProfile;
pub use flow::{
    should_try_device_verification, CodeEntry, LoginAdvance, LoginFlow, LoginStage, SignupFlow,
    SignupStage,
};
