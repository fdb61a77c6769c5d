use thiserror::Error;
use crate::storage::StorageError;

/// Everything a command can fail with. The messages are exactly what the
/// console prints.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassNotFound,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    InstanceNotFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("Not a valid command.")]
    InvalidCall,

    #[error("** invalid dictionary **")]
    InvalidDictionary,

    #[error("** storage error: {0} **")]
    Storage(#[from] StorageError),
}
