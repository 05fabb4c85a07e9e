/// Asks the operator a yes/no question before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlwaysConfirm(pub bool);

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
