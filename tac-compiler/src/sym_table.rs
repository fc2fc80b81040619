use crate::{instruction::{Operand, Place}, value::Number};
use std::collections::HashMap;

/// The facts the optimizer knows about each place while it sweeps through the instructions.
///
/// Entries are added strictly in instruction order. A later assignment to the same place
/// replaces whatever was known before.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Places whose value has been folded to a constant.
    values: HashMap<Place, Number>,

    /// Temporaries that hold an exact copy of another place.
    ///
    /// Only temporaries are recorded here; they are assigned exactly once, so the copy stays
    /// valid for the rest of the program.
    aliases: HashMap<usize, Place>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the folded value of the given place, if it is known.
    pub fn get(&self, place: &Place) -> Option<Number> {
        self.values.get(place).copied()
    }

    /// Records that the given place now holds a known value.
    pub fn insert(&mut self, place: Place, value: Number) {
        if let Place::Temp(n) = place {
            self.aliases.remove(&n);
        }
        self.values.insert(place, value);
    }

    /// Forgets everything known about the given place, because it was assigned a value that
    /// could not be folded.
    pub fn forget(&mut self, place: &Place) {
        self.values.remove(place);
        if let Place::Temp(n) = place {
            self.aliases.remove(n);
        }
    }

    /// Records that the temporary `temp` is a copy of `source`.
    pub fn alias(&mut self, temp: usize, source: Place) {
        self.values.remove(&Place::Temp(temp));
        self.aliases.insert(temp, source);
    }

    /// Replaces an operand with the most specific equivalent operand that is known: its folded
    /// value, or the place a temporary copies.
    pub fn resolve(&self, operand: &Operand) -> Operand {
        let Operand::Place(place) = operand else {
            return operand.clone();
        };

        let place = match place {
            Place::Temp(n) => self.aliases.get(n).unwrap_or(place),
            Place::Var(_) => place,
        };
        match self.get(place) {
            Some(value) => Operand::Const(value),
            None => Operand::Place(place.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Place {
        Place::Var(name.to_string())
    }

    #[test]
    fn resolve_folded_value() {
        let mut table = SymbolTable::new();
        table.insert(var("a"), Number::Int(2));

        assert_eq!(table.resolve(&var("a").into()), Operand::Const(Number::Int(2)));
        assert_eq!(table.resolve(&var("b").into()), Operand::Place(var("b")));
    }

    #[test]
    fn later_assignment_overwrites() {
        let mut table = SymbolTable::new();
        table.insert(var("a"), Number::Int(2));
        table.insert(var("a"), Number::Float(0.5));
        assert_eq!(table.get(&var("a")), Some(Number::Float(0.5)));

        table.forget(&var("a"));
        assert_eq!(table.get(&var("a")), None);
    }

    #[test]
    fn resolve_alias() {
        let mut table = SymbolTable::new();
        table.alias(1, var("y"));
        assert_eq!(table.resolve(&Place::Temp(1).into()), Operand::Place(var("y")));
        assert_eq!(table.resolve(&Place::Temp(2).into()), Operand::Place(Place::Temp(2)));
    }

    #[test]
    fn temps_do_not_alias_vars() {
        let mut table = SymbolTable::new();
        table.insert(Place::Temp(0), Number::Int(1));
        assert_eq!(table.get(&var("t0")), None);
    }
}
