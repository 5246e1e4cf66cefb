/// Words that end the session when typed on their own.
const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// Classification of one line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    /// `exit` or `quit`, in any case, with surrounding whitespace ignored.
    Exit,
    /// Nothing but whitespace.
    Empty,
    /// A message for the model, kept exactly as typed.
    Text(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Input::Empty;
    }

    if EXIT_WORDS
        .iter()
        .any(|word| trimmed.eq_ignore_ascii_case(word))
    {
        return Input::Exit;
    }

    Input::Text(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input("\t \t"), Input::Empty);
    }

    #[test]
    fn test_parse_text_input() {
        assert_eq!(parse_input("Hello, world!"), Input::Text("Hello, world!"));
    }

    #[test]
    fn test_parse_text_keeps_raw_line() {
        assert_eq!(parse_input("  indented  "), Input::Text("  indented  "));
    }

    #[test]
    fn test_parse_exit_words() {
        assert_eq!(parse_input("exit"), Input::Exit);
        assert_eq!(parse_input("quit"), Input::Exit);
    }

    #[test]
    fn test_parse_exit_words_ignore_case_and_whitespace() {
        assert_eq!(parse_input("  QUIT "), Input::Exit);
        assert_eq!(parse_input("Exit\t"), Input::Exit);
    }

    #[test]
    fn test_parse_exit_word_inside_sentence_is_text() {
        assert_eq!(parse_input("how do I quit vim?"), Input::Text("how do I quit vim?"));
        assert_eq!(parse_input("exit now"), Input::Text("exit now"));
    }
}
