#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// The command succeeded and prints nothing.
    Nothing,
    /// Id of a freshly created record.
    Created(String),
    /// String form of one record.
    Instance(String),
    /// String forms of several records.
    Instances(Vec<String>),
    Count(usize),
    Help(Option<String>),
    Quit,
}
