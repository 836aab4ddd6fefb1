use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// One way of subscribing to viewport resize notifications
pub trait BindingMechanism {
    fn name(&self) -> &str;

    /// Whether the environment offers this mechanism at all
    fn available(&self) -> bool;

    fn bind(&mut self);

    fn unbind(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// No mechanism in the chain is available
    Unsupported,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Unsupported => write!(f, "environment doesn't support event binding"),
        }
    }
}

impl std::error::Error for BindingError {}

/// Binds the resize listener through the first available mechanism
#[derive(Default)]
pub struct EventBinder {
    mechanisms: Vec<Box<dyn BindingMechanism>>,
}

impl EventBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority mechanism
    pub fn with_mechanism(mut self, mechanism: impl BindingMechanism + 'static) -> Self {
        self.mechanisms.push(Box::new(mechanism));
        self
    }

    fn first_available(&mut self) -> Result<&mut Box<dyn BindingMechanism>, BindingError> {
        self.mechanisms
            .iter_mut()
            .find(|m| m.available())
            .ok_or(BindingError::Unsupported)
    }

    /// Subscribe; returns the name of the mechanism used
    pub fn bind(&mut self) -> Result<String, BindingError> {
        let mechanism = self.first_available()?;
        mechanism.bind();
        Ok(mechanism.name().to_string())
    }

    /// Unsubscribe through the same priority order
    pub fn unbind(&mut self) -> Result<String, BindingError> {
        let mechanism = self.first_available()?;
        mechanism.unbind();
        Ok(mechanism.name().to_string())
    }
}

/// Mechanism backed by a shared flag; the host reads `is_bound` to decide
/// whether to forward resize events
#[derive(Debug, Clone)]
pub struct FlagBinding {
    name: String,
    available: bool,
    bound: Rc<Cell<bool>>,
}

impl FlagBinding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            bound: Rc::new(Cell::new(false)),
        }
    }

    /// Mechanism the environment lacks
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            available: false,
            ..Self::new(name)
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound.get()
    }
}

impl BindingMechanism for FlagBinding {
    fn name(&self) -> &str {
        &self.name
    }

    fn available(&self) -> bool {
        self.available
    }

    fn bind(&mut self) {
        self.bound.set(true);
    }

    fn unbind(&mut self) {
        self.bound.set(false);
    }
}
