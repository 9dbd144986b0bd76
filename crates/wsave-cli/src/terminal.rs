//! Line-based file dialog for the terminal.
//!
//! Implements both dialog surfaces so either picker strategy can drive it.
//! A single `.` or end of input cancels; an empty answer keeps the shown
//! default.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use wsave_core::PickerChoice;
use wsave_core::picker::{
    LiveDialog, LiveSession, NativeDialog, names_directory, overwrite_question,
};

const CANCEL: &str = ".";

/// Prompts on `output` and reads answers from `input`.
#[derive(Debug)]
pub struct TerminalDialog<R, W> {
    input: R,
    output: W,
}

/// One line read from the user.
enum Answer {
    Cancel,
    Default,
    Text(String),
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Answer> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Answer::Cancel);
        }
        Ok(match line.trim() {
            CANCEL => Answer::Cancel,
            "" => Answer::Default,
            text => Answer::Text(text.to_string()),
        })
    }

    /// Print the title and ask for one of `filters`, `selected` being the
    /// default.
    fn ask_filter(&mut self, filters: &[String], selected: &str) -> io::Result<Option<usize>> {
        writeln!(self.output, "Save File")?;
        let default = filters.iter().position(|f| f == selected).unwrap_or(0);
        for (index, filter) in filters.iter().enumerate() {
            let marker = if index == default { '*' } else { ' ' };
            writeln!(self.output, " {marker} [{}] {filter}", index + 1)?;
        }
        loop {
            match self.ask(&format!("Format [{}]: ", default + 1))? {
                Answer::Cancel => return Ok(None),
                Answer::Default => return Ok(Some(default)),
                Answer::Text(text) => match text.parse::<usize>() {
                    Ok(number) if (1..=filters.len()).contains(&number) => {
                        return Ok(Some(number - 1));
                    }
                    _ => writeln!(self.output, "Enter a number from 1 to {}.", filters.len())?,
                },
            }
        }
    }

    /// Ask for a file name; relative answers are resolved against `current`.
    ///
    /// Directories are not accepted as an answer.
    fn ask_name(&mut self, current: &Path) -> io::Result<Option<PathBuf>> {
        loop {
            let path = match self.ask(&format!("File name [{}]: ", current.display()))? {
                Answer::Cancel => return Ok(None),
                Answer::Default => current.to_path_buf(),
                Answer::Text(text) => resolve(current, Path::new(&text)),
            };
            if path.as_os_str().is_empty() || names_directory(&path) {
                writeln!(self.output, "Enter a file name, not a directory.")?;
                continue;
            }
            return Ok(Some(path));
        }
    }

    fn ask_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        writeln!(self.output, "{}", overwrite_question(path))?;
        Ok(match self.ask("[y/N]: ")? {
            Answer::Text(text) => matches!(text.to_lowercase().as_str(), "y" | "yes"),
            Answer::Cancel | Answer::Default => false,
        })
    }
}

/// A prompt that cannot be shown or answered counts as a cancel.
fn or_cancel<T>(result: io::Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|err| {
        warn!(error = %err, "Terminal dialog failed, cancelling");
        None
    })
}

/// Resolve a typed name the way a dialog showing `current` would.
fn resolve(current: &Path, typed: &Path) -> PathBuf {
    if typed.is_absolute() {
        return typed.to_path_buf();
    }
    let base = if names_directory(current) {
        current
    } else {
        current.parent().unwrap_or(Path::new(""))
    };
    base.join(typed)
}

impl<R: BufRead, W: Write> NativeDialog for TerminalDialog<R, W> {
    fn show(&mut self, start: &Path, filters: &[String], selected: &str) -> Option<PickerChoice> {
        let index = or_cancel(self.ask_filter(filters, selected))?;
        let path = or_cancel(self.ask_name(start))?;
        Some(PickerChoice::new(path, filters[index].clone()))
    }

    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        or_cancel(self.ask_overwrite(path).map(Some)).unwrap_or(false)
    }
}

impl<R: BufRead, W: Write> LiveDialog for TerminalDialog<R, W> {
    fn run(&mut self, session: &mut LiveSession) -> wsave_core::Result<bool> {
        let filters = session.filters().to_vec();
        let Some(index) = or_cancel(self.ask_filter(&filters, session.selected_filter())) else {
            return Ok(false);
        };
        session.select_filter(&filters[index])?;

        let current = session.displayed_name().to_path_buf();
        let Some(typed) = or_cancel(self.ask_name(&current)) else {
            return Ok(false);
        };
        session.set_displayed_name(&typed);
        let saved_as = session.displayed_name().display().to_string();
        Ok(or_cancel(writeln!(self.output, "Saving as {saved_as}").map(Some)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wsave_core::KnownExtensions;

    fn filters() -> Vec<String> {
        vec!["Tab (*.tab)".into(), "CSV (*.csv)".into()]
    }

    fn dialog(script: &str) -> TerminalDialog<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalDialog::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_show_returns_typed_name_and_filter() {
        let mut d = dialog("2\nreport\n");
        let choice = d
            .show(Path::new("/data/out.tab"), &filters(), "Tab (*.tab)")
            .unwrap();
        assert_eq!(choice.path, PathBuf::from("/data/report"));
        assert_eq!(choice.filter, "CSV (*.csv)");
    }

    #[test]
    fn test_show_defaults_and_cancel() {
        let mut d = dialog("\n\n");
        let choice = d
            .show(Path::new("/data/out.tab"), &filters(), "CSV (*.csv)")
            .unwrap();
        assert_eq!(choice.path, PathBuf::from("/data/out.tab"));
        assert_eq!(choice.filter, "CSV (*.csv)");

        let mut d = dialog(".\n");
        assert!(d.show(Path::new("/data"), &filters(), "Tab (*.tab)").is_none());

        let mut d = dialog("");
        assert!(d.show(Path::new("/data"), &filters(), "Tab (*.tab)").is_none());
    }

    #[test]
    fn test_invalid_format_is_asked_again() {
        let mut d = dialog("7\n1\n/tmp/x\n");
        let choice = d
            .show(Path::new("/data"), &filters(), "CSV (*.csv)")
            .unwrap();
        assert_eq!(choice.filter, "Tab (*.tab)");
        let output = String::from_utf8(d.into_output()).unwrap();
        assert!(output.contains("Enter a number from 1 to 2."));
    }

    #[test]
    fn test_directory_name_is_asked_again() {
        let dir = tempfile::tempdir().unwrap();
        let mut d = dialog("1\n\nout/\niris\n");
        let choice = d.show(dir.path(), &filters(), "Tab (*.tab)").unwrap();
        assert_eq!(choice.path, dir.path().join("iris"));
        let output = String::from_utf8(d.into_output()).unwrap();
        assert_eq!(output.matches("Enter a file name, not a directory.").count(), 2);
    }

    #[test]
    fn test_directory_name_then_end_of_input_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let mut d = dialog("\n\n");
        assert!(d.show(dir.path(), &filters(), "Tab (*.tab)").is_none());
    }

    /// Output that refuses every write.
    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_prompt_cancels() {
        let mut d = TerminalDialog::new(Cursor::new(b"1\nreport\ny\n".to_vec()), ClosedOutput);
        assert!(d.show(Path::new("/data"), &filters(), "Tab (*.tab)").is_none());
        assert!(!d.confirm_overwrite(Path::new("/data/report.tab")));
    }

    #[test]
    fn test_confirm_overwrite() {
        assert!(dialog("y\n").confirm_overwrite(Path::new("/tmp/x.tab")));
        assert!(dialog("YES\n").confirm_overwrite(Path::new("/tmp/x.tab")));
        assert!(!dialog("\n").confirm_overwrite(Path::new("/tmp/x.tab")));
        assert!(!dialog("").confirm_overwrite(Path::new("/tmp/x.tab")));
    }

    #[test]
    fn test_live_run_normalizes_while_open() {
        let mut session = LiveSession::new(
            filters(),
            KnownExtensions::from_extensions([".tab", ".csv"]),
            PathBuf::from("/data/out.tab"),
        );
        session.select_filter("Tab (*.tab)").unwrap();

        let mut d = dialog("2\n\n");
        assert!(d.run(&mut session).unwrap());

        let choice = session.accept().unwrap();
        assert_eq!(choice.path, PathBuf::from("/data/out.csv"));
        assert_eq!(choice.filter, "CSV (*.csv)");
        let output = String::from_utf8(d.into_output()).unwrap();
        assert!(output.contains("File name [/data/out.csv]: "));
    }
}
