/// Persona and citation policy sent as the first message of every request.
pub const SYSTEM_INSTRUCTION: &str = include_str!("../data/prompts/system_instruction.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_is_non_empty() {
        assert!(!SYSTEM_INSTRUCTION.trim().is_empty());
    }

    #[test]
    fn test_system_instruction_has_no_trailing_newline() {
        assert!(!SYSTEM_INSTRUCTION.ends_with('\n'));
    }
}
