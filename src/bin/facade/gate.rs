//! Output gate backed by the cpal stream.
//!
//! The stream is opened and played at startup, and the mixer renders silence
//! until the gate is resumed. The first resume happens when the session is
//! started right after the stream, so audio is live before the UI draws.
//! If the stream reports an error the device is marked lost and every later
//! resume fails, leaving the mixer silent.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use facade_mix::{error::GateError, mixer::OutputGate};

#[derive(Clone, Default)]
pub struct DeviceStatus {
    lost: Arc<AtomicBool>,
}

impl DeviceStatus {
    pub fn mark_lost(&self) {
        self.lost.store(true, Ordering::Relaxed);
    }

    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Relaxed)
    }
}

pub struct DeviceGate {
    status: DeviceStatus,
    resumed: bool,
}

impl DeviceGate {
    pub fn new(status: DeviceStatus) -> Self {
        Self { status, resumed: false }
    }
}

impl OutputGate for DeviceGate {
    fn resume(&mut self) -> Result<(), GateError> {
        if self.status.is_lost() {
            self.resumed = false;
            return Err(GateError::NoDevice);
        }
        self.resumed = true;
        Ok(())
    }

    fn is_resumed(&self) -> bool {
        self.resumed && !self.status.is_lost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facade_mix::{config::MixConfig, session::FacadeSession};

    #[test]
    fn session_start_resumes_the_device() {
        let mut session = FacadeSession::new(MixConfig::default(), DeviceGate::new(DeviceStatus::default())).unwrap();
        assert!(!session.manager().is_gate_resumed());

        session.start();
        assert!(session.manager().is_gate_resumed());
    }

    #[test]
    fn lost_device_refuses_to_resume() {
        let status = DeviceStatus::default();
        let mut gate = DeviceGate::new(status.clone());
        assert!(gate.resume().is_ok());
        assert!(gate.is_resumed());

        status.mark_lost();
        assert!(!gate.is_resumed());
        assert!(matches!(gate.resume(), Err(GateError::NoDevice)));
    }
}
