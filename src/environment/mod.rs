//! Lexical scopes.
//!
//! An `Environment` maps identifiers to values and chains to an enclosing
//! scope. Lookup walks outward until the name is found or the chain is
//! exhausted; the miss is an explicit `None`, never conflated with a stored
//! falsy value. Environments are shared through `RcCell` so a function value
//! and the scope it closed over alias the same bindings: a later `let` in
//! the captured scope is visible to closures made earlier.

use std::collections::HashMap;

use crate::{interpreter::Value, utils::RcCell};

#[derive(Debug, Default)]
pub struct Environment {
	variables: HashMap<String, Value>,
	parent:    Option<RcCell<Environment>>,
}

impl Environment {
	pub fn new() -> Self { Self::default() }

	/// A scope nested inside `parent`.
	pub fn with_parent(parent: RcCell<Environment>) -> Self {
		Self { variables: HashMap::new(), parent: Some(parent) }
	}

	/// Bind `name` in this scope. Rebinding an existing name overwrites it.
	pub fn define(&mut self, name: impl Into<String>, value: Value) {
		self.variables.insert(name.into(), value);
	}

	/// Look `name` up through the scope chain. The returned value is a copy;
	/// re-stamping its span never touches the stored binding.
	pub fn get(&self, name: &str) -> Option<Value> {
		self
			.variables
			.get(name)
			.cloned()
			.or_else(|| self.parent.as_ref().and_then(|parent| parent.borrow().get(name)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn define_and_get() {
		let mut env = Environment::new();
		assert!(env.get("x").is_none());
		env.define("x", Value::number(1.0));
		assert_eq!(env.get("x").unwrap().to_string(), "1");
		env.define("x", Value::number(2.0));
		assert_eq!(env.get("x").unwrap().to_string(), "2");
	}

	#[test]
	fn lookup_walks_parents() {
		let outer = RcCell::new(Environment::new());
		outer.borrow_mut().define("x", Value::number(10.0));

		let inner = Environment::with_parent(outer.clone());
		assert_eq!(inner.get("x").unwrap().to_string(), "10");

		// A later binding in the outer scope is visible through the chain.
		outer.borrow_mut().define("y", Value::bool(true));
		assert_eq!(inner.get("y").unwrap().to_string(), "true");
		assert!(inner.get("z").is_none());
	}

	#[test]
	fn inner_binding_shadows_outer() {
		let outer = RcCell::new(Environment::new());
		outer.borrow_mut().define("x", Value::number(1.0));
		let mut inner = Environment::with_parent(outer.clone());
		inner.define("x", Value::number(2.0));
		assert_eq!(inner.get("x").unwrap().to_string(), "2");
		assert_eq!(outer.borrow().get("x").unwrap().to_string(), "1");
	}
}
