use crate::error::GateError;

/// The audio output the mixer renders into.
///
/// Outputs start suspended and have to be resumed once, typically in
/// response to the first user gesture. Until then the manager renders
/// silence and leaves the graph alone.
pub trait OutputGate: Send {
    fn resume(&mut self) -> Result<(), GateError>;

    fn is_resumed(&self) -> bool;
}

/// A gate with nothing behind it: starts suspended, always resumes.
///
/// Used for offline rendering, benches and tests.
#[derive(Debug, Default)]
pub struct ImmediateGate {
    resumed: bool,
}

impl ImmediateGate {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputGate for ImmediateGate {
    fn resume(&mut self) -> Result<(), GateError> {
        self.resumed = true;
        Ok(())
    }

    fn is_resumed(&self) -> bool {
        self.resumed
    }
}

impl<G: OutputGate + ?Sized> OutputGate for Box<G> {
    fn resume(&mut self) -> Result<(), GateError> {
        (**self).resume()
    }

    fn is_resumed(&self) -> bool {
        (**self).is_resumed()
    }
}
