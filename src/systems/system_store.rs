use crate::entities::EntityStore;
use crate::error::SystemError;
use std::collections::HashSet;
use crate::systems::System;
use std::any::TypeId;
use log::debug;

pub(crate) struct SystemStore {
	state: State,
	set: HashSet<TypeId>,
	systems: Vec<Box<dyn System>>,
}

#[derive(Default)]
enum State {
	#[default]
	Uninitialized,
	Initialized,
}

impl SystemStore {
	pub fn new() -> Self {
		Self {
			set: HashSet::default(),
			state: State::default(),
			systems: Vec::default(),
		}
	}

	pub fn add_system<T: 'static + System>(&mut self, system: T) -> Result<(), SystemError> {
		let name = std::any::type_name::<T>();
		match self.state {
			State::Uninitialized => {
				if !self.set.insert(TypeId::of::<T>()) {
					return Err(SystemError::AlreadyRegistered(name));
				}
				self.systems.push(Box::new(system));
				Ok(())
			},
			State::Initialized => Err(SystemError::RegistrationClosed(name)),
		}
	}

	pub fn setup_systems(&mut self, entities: &mut EntityStore) -> Result<(), SystemError> {
		match self.state {
			State::Uninitialized => {
				self.systems.iter_mut().for_each(|s| s.setup(entities));
				self.state = State::Initialized;
				debug!("Initialized {} systems", self.systems.len());
				Ok(())
			},
			State::Initialized => Err(SystemError::AlreadyInitialized),
		}
	}

	pub fn run_systems(&mut self, entities: &mut EntityStore) -> Result<(), SystemError> {
		match self.state {
			State::Uninitialized => Err(SystemError::NotInitialized),
			State::Initialized => {
				self.systems.iter_mut().for_each(|s| s.run(entities));
				Ok(())
			},
		}
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}
}
