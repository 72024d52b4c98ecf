//! Flat printed trace of a simulation.

use std::io::{self, Write};
use crate::cellular::Automaton;

/// Write `num_steps` frames starting at `seed`, each as a `Step N` header
/// followed by the grid rows.
pub fn write_trace<W: Write>(out: &mut W, seed: Automaton, num_steps: usize) -> io::Result<()> {
    let mut automaton = seed;
    for step in 0..num_steps {
        writeln!(out, "Step {}", step)?;
        write!(out, "{}", automaton)?;
        if step + 1 < num_steps {
            automaton = automaton.next();
        }
    }
    Ok(())
}
