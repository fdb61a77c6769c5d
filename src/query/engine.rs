use serde_json::Value;
use tracing::debug;
use crate::metadata::ClassKind;
use crate::storage::{FileStorage, Record};
use super::error::CommandError;
use super::result::CommandOutput;
use super::parser::{parse_line, Command, Target};

/// Runs console commands against a store it borrows for its lifetime.
pub struct CommandEngine<'a> {
    storage: &'a mut FileStorage,
}

impl<'a> CommandEngine<'a> {
    pub fn new(storage: &'a mut FileStorage) -> Self {
        CommandEngine { storage }
    }

    /// Parses and runs one console line.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutput, CommandError> {
        let command = parse_line(line)?;
        debug!(?command, "dispatching");
        self.run(command)
    }

    pub fn run(&mut self, command: Command) -> Result<CommandOutput, CommandError> {
        match command {
            Command::Empty => Ok(CommandOutput::Nothing),
            Command::Quit => Ok(CommandOutput::Quit),
            Command::Help(topic) => Ok(CommandOutput::Help(topic)),
            Command::Create { class } => self.execute_create(class.as_deref()),
            Command::Show(target) => self.execute_show(&target),
            Command::Destroy(target) => self.execute_destroy(&target),
            Command::All { class } => self.execute_all(class.as_deref()),
            Command::Count { class } => self.execute_count(class.as_deref()),
            Command::Update { target, attribute, value } => {
                let key = self.resolve_key(&target)?;
                let attribute = attribute.ok_or(CommandError::AttributeNameMissing)?;
                let value = value.ok_or(CommandError::ValueMissing)?;
                self.apply_updates(&key, vec![(attribute, value)])
            }
            Command::UpdateMany { target, attributes } => {
                let key = self.resolve_key(&target)?;
                self.apply_updates(&key, attributes)
            }
        }
    }

    fn resolve_class(&self, class: Option<&str>) -> Result<ClassKind, CommandError> {
        let name = class.ok_or(CommandError::ClassNameMissing)?;
        ClassKind::from_name(name).ok_or(CommandError::ClassNotFound)
    }

    /// Checks class, id and existence in that order and returns the record.
    fn find_record(&self, target: &Target) -> Result<&Record, CommandError> {
        let class = self.resolve_class(target.class.as_deref())?;
        let id = target.id.as_deref().ok_or(CommandError::InstanceIdMissing)?;

        self.storage
            .get(&format!("{}.{}", class.name(), id))
            .ok_or(CommandError::InstanceNotFound)
    }

    fn resolve_key(&self, target: &Target) -> Result<String, CommandError> {
        self.find_record(target).map(Record::key)
    }

    fn execute_create(&mut self, class: Option<&str>) -> Result<CommandOutput, CommandError> {
        let class = self.resolve_class(class)?;
        let record = Record::new(class);
        let id = record.id.clone();

        self.storage.new_record(record);
        self.storage.save()?;

        debug!(class = %class, id = %id, "created record");
        Ok(CommandOutput::Created(id))
    }

    fn execute_show(&self, target: &Target) -> Result<CommandOutput, CommandError> {
        let record = self.find_record(target)?;
        Ok(CommandOutput::Instance(record.to_string()))
    }

    fn execute_destroy(&mut self, target: &Target) -> Result<CommandOutput, CommandError> {
        let key = self.resolve_key(target)?;
        self.storage.remove(&key);
        self.storage.save()?;

        debug!(key = %key, "destroyed record");
        Ok(CommandOutput::Nothing)
    }

    fn execute_all(&self, class: Option<&str>) -> Result<CommandOutput, CommandError> {
        let instances = match class {
            None => self.storage.all().values().map(|r| r.to_string()).collect(),
            Some(name) => {
                let class = ClassKind::from_name(name).ok_or(CommandError::ClassNotFound)?;
                self.storage.of_class(class).map(|r| r.to_string()).collect()
            }
        };
        Ok(CommandOutput::Instances(instances))
    }

    fn execute_count(&self, class: Option<&str>) -> Result<CommandOutput, CommandError> {
        let class = class
            .and_then(ClassKind::from_name)
            .ok_or(CommandError::ClassNotFound)?;
        Ok(CommandOutput::Count(self.storage.count(class)))
    }

    /// Sets every pair on the record, then refreshes `updated_at` and saves
    /// once. Managed fields are skipped.
    fn apply_updates(&mut self, key: &str, attributes: Vec<(String, Value)>) -> Result<CommandOutput, CommandError> {
        let record = self.storage.get_mut(key).ok_or(CommandError::InstanceNotFound)?;

        let mut changed = false;
        for (name, value) in attributes {
            if record.set(&name, value) {
                changed = true;
            } else {
                debug!(key = %key, attribute = %name, "ignoring managed attribute");
            }
        }

        if changed {
            record.touch();
            self.storage.save()?;
        }
        Ok(CommandOutput::Nothing)
    }
}
