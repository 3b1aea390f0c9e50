use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A validation rule. Returns `None` if the value is valid.
pub type Rule<V> = Box<dyn Fn(Option<&V>) -> Option<ValidationError>>;

/// Fails when the value is unset.
pub fn required<V: 'static>(message: impl Into<String>) -> Rule<V> {
    let message = message.into();
    Box::new(move |value: Option<&V>| {
        value
            .is_none()
            .then(|| ValidationError::new(message.clone()))
    })
}

/// Fails when `check` returns `false` for a set value. Unset values pass.
pub fn check<V: 'static>(
    message: impl Into<String>,
    predicate: impl Fn(&V) -> bool + 'static,
) -> Rule<V> {
    let message = message.into();
    Box::new(move |value: Option<&V>| match value {
        Some(v) if !predicate(v) => Some(ValidationError::new(message.clone())),
        _ => None,
    })
}

/// Runs every rule and collects the failures in rule order.
pub fn run_rules<V>(rules: &[Rule<V>], value: Option<&V>) -> Vec<ValidationError> {
    rules.iter().filter_map(|rule| rule(value)).collect()
}
