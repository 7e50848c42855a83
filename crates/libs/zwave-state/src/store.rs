//! Per-node hierarchical value store.
//!
//! Values live three levels deep: command class, then instance, then index.
//! Neither container level is ever left empty after a [`ValueStore::take`] or
//! [`ValueStore::remove`]; removing the last value of an instance removes the
//! instance, and removing the last instance of a class removes the class.

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;
use std::mem;

use serde::Serialize;

use crate::value::{Value, ValueId, ValuePayload};

/// Values of one command class instance, keyed by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueInstance {
    instance_id: u8,
    values: BTreeMap<u8, Value>,
}

impl ValueInstance {
    fn new(instance_id: u8) -> Self {
        Self { instance_id, values: BTreeMap::new() }
    }

    pub fn instance_id(&self) -> u8 {
        self.instance_id
    }

    pub fn get(&self, index: u8) -> Option<&Value> {
        self.values.get(&index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> btree_map::Values<'_, u8, Value> {
        self.values.values()
    }
}

/// Instances of one command class, keyed by instance id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueClass {
    command_class_id: u8,
    instances: BTreeMap<u8, ValueInstance>,
}

impl ValueClass {
    fn new(command_class_id: u8) -> Self {
        Self { command_class_id, instances: BTreeMap::new() }
    }

    pub fn command_class_id(&self) -> u8 {
        self.command_class_id
    }

    pub fn instance(&self, instance_id: u8) -> Option<&ValueInstance> {
        self.instances.get(&instance_id)
    }

    pub fn instances(&self) -> btree_map::Values<'_, u8, ValueInstance> {
        self.instances.values()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValueStore {
    classes: BTreeMap<u8, ValueClass>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the instance container for `(command_class_id, instance_id)`,
    /// creating the class and instance on the way if needed.
    ///
    /// A freshly created slot is empty until a value is placed in it; callers
    /// outside [`ValueStore::take`] should follow up with a `take` for the
    /// same pair.
    pub fn get_or_create_slot(
        &mut self,
        command_class_id: u8,
        instance_id: u8,
    ) -> &mut ValueInstance {
        self.classes
            .entry(command_class_id)
            .or_insert_with(|| ValueClass::new(command_class_id))
            .instances
            .entry(instance_id)
            .or_insert_with(|| ValueInstance::new(instance_id))
    }

    /// Moves the payload out of `incoming` into the value at `value_id`'s
    /// triple.
    ///
    /// For a new triple the value is inserted and `incoming` is left `None`.
    /// For an existing triple the payload is replaced in place and the prior
    /// payload is handed back through `incoming` for the caller to dispose.
    /// An empty `incoming` changes nothing and yields the current value.
    pub fn take(
        &mut self,
        value_id: ValueId,
        incoming: &mut Option<ValuePayload>,
    ) -> Option<&Value> {
        let (command_class_id, instance_id, index) = value_id.triple();
        let Some(payload) = incoming.take() else {
            return self.get(command_class_id, instance_id, index);
        };

        let slot = self.get_or_create_slot(command_class_id, instance_id);
        match slot.values.entry(index) {
            Entry::Vacant(entry) => {
                log::trace!("value {command_class_id:#04x}/{instance_id}/{index} added");
                let value: &Value = entry.insert(Value::new(value_id, payload));
                Some(value)
            }
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                value.value_id = value_id;
                *incoming = Some(mem::replace(&mut value.payload, payload));
                log::trace!("value {command_class_id:#04x}/{instance_id}/{index} updated");
                Some(&*value)
            }
        }
    }

    /// Removes the value at the triple, pruning emptied containers bottom-up.
    /// Absent triples are a no-op.
    pub fn remove(&mut self, command_class_id: u8, instance_id: u8, index: u8) -> Option<Value> {
        let class = self.classes.get_mut(&command_class_id)?;
        let instance = class.instances.get_mut(&instance_id)?;
        let removed = instance.values.remove(&index)?;

        if instance.values.is_empty() {
            class.instances.remove(&instance_id);
            if class.instances.is_empty() {
                self.classes.remove(&command_class_id);
            }
        }

        log::trace!("value {command_class_id:#04x}/{instance_id}/{index} removed");
        Some(removed)
    }

    pub fn get(&self, command_class_id: u8, instance_id: u8, index: u8) -> Option<&Value> {
        self.classes
            .get(&command_class_id)?
            .instances
            .get(&instance_id)?
            .values
            .get(&index)
    }

    pub fn contains(&self, command_class_id: u8, instance_id: u8, index: u8) -> bool {
        self.get(command_class_id, instance_id, index).is_some()
    }

    pub fn class(&self, command_class_id: u8) -> Option<&ValueClass> {
        self.classes.get(&command_class_id)
    }

    pub fn classes(&self) -> btree_map::Values<'_, u8, ValueClass> {
        self.classes.values()
    }

    /// All values in `(command class, instance, index)` order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.classes
            .values()
            .flat_map(|class| class.instances.values())
            .flat_map(|instance| instance.values.values())
    }

    /// Number of values across all classes and instances.
    pub fn len(&self) -> usize {
        self.classes
            .values()
            .flat_map(|class| class.instances.values())
            .map(ValueInstance::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }
}
