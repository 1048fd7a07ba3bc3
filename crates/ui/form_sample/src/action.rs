use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Update,
    Submit,
    Cancel,
    Reset,
    Quit,
}
