//! Line sources for the interactive shell.

use std::io::{self, BufRead, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Something the shell can read answers from.
pub trait LineSource {
    /// Shows `prompt` and reads one line without its terminator.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> io::Result<Option<String>>;
}

/// Reads lines from any [`BufRead`], echoing prompts to the shell output.
///
/// Used for piped input and scripted tests.
pub struct ScriptInput<R> {
    reader: R,
}

impl<R: BufRead> ScriptInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ScriptInput<R> {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> io::Result<Option<String>> {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Terminal input with line editing and history.
///
/// Ctrl-C and Ctrl-D both end input.
pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str, _output: &mut dyn Write) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_script_input_echoes_prompt() {
        let mut input = ScriptInput::new(Cursor::new("Silencio\n"));
        let mut output = Vec::new();

        let line = input.read_line("Event [Crítica]: ", &mut output).unwrap();

        assert_eq!(line.as_deref(), Some("Silencio"));
        assert_eq!(String::from_utf8(output).unwrap(), "Event [Crítica]: ");
    }

    #[test]
    fn test_script_input_strips_crlf() {
        let mut input = ScriptInput::new(Cursor::new("0.5\r\n\r\n"));
        let mut output = Vec::new();

        assert_eq!(input.read_line("", &mut output).unwrap().as_deref(), Some("0.5"));
        assert_eq!(input.read_line("", &mut output).unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line("", &mut output).unwrap(), None);
    }
}
