use std::io;
use std::io::BufWriter;
use std::io::Write;

use log::info;

use crate::Dfa;

/// The label of the self loop that marks an accepting state in the output.
pub const ACCEPTING_LABEL: &str = "accepting";

/// Write a deterministic automaton in plain text in Aldebaran format to the
/// given writer. Transitions are labelled by their symbol, and every accepting
/// state additionally gets a self loop labelled [`ACCEPTING_LABEL`] since the
/// format has no notion of acceptance. The writer is buffered internally.
pub fn write_aut(writer: &mut impl Write, dfa: &Dfa) -> io::Result<()> {
    info!("Writing automaton in .aut format...");

    let mut writer = BufWriter::new(writer);
    let num_of_accepting = dfa.accepting_states().count();
    writeln!(
        writer,
        "des ({}, {}, {})",
        dfa.initial_state_index(),
        dfa.num_of_transitions() + num_of_accepting,
        dfa.num_of_states()
    )?;

    for state_index in dfa.iter_states() {
        for symbol in 0..dfa.num_of_symbols() {
            if let Some(to) = dfa.successor(state_index, symbol) {
                writeln!(writer, "({state_index}, \"{symbol}\", {to})")?;
            }
        }

        if dfa.is_accepting(state_index) {
            writeln!(writer, "({state_index}, \"{ACCEPTING_LABEL}\", {state_index})")?;
        }
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    use superperm_utilities::Timing;
    use test_log::test;

    use crate::build_automaton;

    #[test]
    fn test_writing_aut() {
        let dfa = build_automaton(2, None, &mut Timing::new()).unwrap();

        let mut buffer = Vec::new();
        write_aut(&mut buffer, &dfa).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        let num_of_accepting = dfa.accepting_states().count();
        assert_eq!(
            lines.next(),
            Some(format!("des (0, {}, {})", dfa.num_of_transitions() + num_of_accepting, dfa.num_of_states()).as_str())
        );
        assert_eq!(lines.count(), dfa.num_of_transitions() + num_of_accepting);
        assert!(text.contains(&format!("\"{ACCEPTING_LABEL}\"")));
    }
}
