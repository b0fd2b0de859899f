use crate::types::MachineError;

/// An embedded example program: its rule text plus a suggested input tape.
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub rules: &'static str,
    pub input_tape: &'static str,
}

// Default embedded programs
const PROGRAM_SOURCES: [(&str, &str, &str, &str); 4] = [
    (
        "Right scanner",
        "Scans right to the first blank and extends the mark block by one",
        include_str!("../programs/right-scanner.tm"),
        "||||",
    ),
    (
        "Unary decrement",
        "Erases one mark from the front of a unary number",
        include_str!("../programs/unary-decrement.tm"),
        "|||",
    ),
    (
        "Binary increment",
        "Adds one to a binary number with a rippling carry",
        include_str!("../programs/binary-increment.tm"),
        "1011",
    ),
    (
        "Busy beaver 3",
        "Three-state busy beaver, writes six marks from an empty tape",
        include_str!("../programs/busy-beaver-3.tm"),
        "",
    ),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<ProgramInfo> = PROGRAM_SOURCES
        .iter()
        .map(|&(name, description, rules, input_tape)| ProgramInfo {
            name,
            description,
            rules,
            input_tape,
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of embedded programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn by_index(index: usize) -> Result<&'static ProgramInfo, MachineError> {
        PROGRAMS.get(index).ok_or(MachineError::OutOfRange {
            index,
            len: PROGRAMS.len(),
        })
    }

    /// Get a program by its name
    pub fn by_name(name: &str) -> Result<&'static ProgramInfo, MachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .ok_or_else(|| MachineError::File(format!("program '{}' not found", name)))
    }

    /// List all program names
    pub fn names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Search for programs whose name contains the query, case-insensitively
    pub fn search(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use crate::machine::Machine;
    use crate::types::RunOutcome;

    #[test]
    fn test_registry_contents() {
        assert_eq!(ProgramManager::count(), 4);

        let names = ProgramManager::names();
        assert!(names.contains(&"Right scanner"));
        assert!(names.contains(&"Unary decrement"));
        assert!(names.contains(&"Binary increment"));
        assert!(names.contains(&"Busy beaver 3"));
    }

    #[test]
    fn test_all_programs_are_valid() {
        for program in PROGRAMS.iter() {
            let machine = Machine::new(program.rules, MachineConfig::default());
            assert!(machine.is_ok(), "program '{}' is invalid", program.name);
        }
    }

    #[test]
    fn test_all_programs_halt_on_their_input() {
        for program in PROGRAMS.iter() {
            let mut machine = Machine::new(program.rules, MachineConfig::default()).unwrap();
            let (_, outcome) = machine.run(program.input_tape).unwrap();
            assert_eq!(
                outcome,
                RunOutcome::Halted,
                "program '{}' did not halt",
                program.name
            );
        }
    }

    #[test]
    fn test_binary_increment_result() {
        let program = ProgramManager::by_name("Binary increment").unwrap();
        let mut machine = Machine::new(program.rules, MachineConfig::default()).unwrap();

        let (summary, _) = machine.run("1011").unwrap();
        assert_eq!(summary.tape, "1100");

        let (summary, _) = machine.run("111").unwrap();
        assert_eq!(summary.tape, "1000");
    }

    #[test]
    fn test_busy_beaver_step_count() {
        let program = ProgramManager::by_name("Busy beaver 3").unwrap();
        let mut machine = Machine::new(program.rules, MachineConfig::default()).unwrap();

        let (summary, _) = machine.run("").unwrap();
        assert_eq!(summary.steps, 13);
        assert_eq!(summary.tape, "111111");
    }

    #[test]
    fn test_lookup_by_index_and_name() {
        assert!(ProgramManager::by_index(0).is_ok());
        assert!(ProgramManager::by_index(999).is_err());
        assert!(ProgramManager::by_name("Right scanner").is_ok());
        assert!(ProgramManager::by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_search() {
        assert_eq!(ProgramManager::search("binary").len(), 1);
        assert!(!ProgramManager::search("beaver").is_empty());
        assert!(ProgramManager::search("nonexistent").is_empty());
    }
}
