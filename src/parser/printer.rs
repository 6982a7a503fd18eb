use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use terminal_size::{terminal_size, Width};

use crate::api::ArgumentParser;

// Let's assume the average word length is 5.
// Then 17 allows precisely 3 words with a space between them, and a narrower
// description column is not worth wrapping into.
const MINIMUM_DOC_WIDTH: usize = 17;

impl ArgumentParser {
    // The help screen: a usage line (required options with their shortdocs,
    // then positionals, bracketed when optional), a blank line, then one row
    // per option with the descriptions left-aligned to a common column.
    pub(crate) fn help_lines(&self) -> Vec<String> {
        let mut usage = format!("USAGE: {program}", program = self.program);

        for slot in &self.named {
            let arg = slot.arg();
            if arg.required {
                usage.push_str(&format!(
                    " {name} {shortdoc}",
                    name = arg.name,
                    shortdoc = arg.shortdoc
                ));
            }
        }

        for arg in &self.positionals {
            if arg.required {
                usage.push_str(&format!(" {shortdoc}", shortdoc = arg.shortdoc));
            } else {
                usage.push_str(&format!(" [{shortdoc}]", shortdoc = arg.shortdoc));
            }
        }

        let mut lines = vec![usage, String::default()];

        let longest = self
            .named
            .iter()
            .map(|slot| {
                let arg = slot.arg();
                arg.name.len() + 1 + arg.shortdoc.len()
            })
            .max()
            .expect("internal error - the help switch is always present");

        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        for slot in &self.named {
            let arg = slot.arg();
            let width = longest + 2 - arg.name.len();
            let left = format!(
                "  {name} {shortdoc:<width$}",
                name = arg.name,
                shortdoc = arg.shortdoc
            );

            match terminal_width {
                // Word-wrap an overflowing description onto continuation
                // lines indented to the description column.
                Some(total)
                    if left.len() + arg.doc.len() > total
                        && total > left.len() + MINIMUM_DOC_WIDTH =>
                {
                    let indent = left.len();
                    let mut chunks = wrap(&arg.doc, total - indent).into_iter();
                    lines.push(format!(
                        "{left}{chunk}",
                        chunk = chunks.next().unwrap_or_default()
                    ));

                    for chunk in chunks {
                        lines.push(format!("{:indent$}{chunk}", ""));
                    }
                }
                _ => lines.push(format!("{left}{doc}", doc = arg.doc)),
            }
        }

        lines
    }

    /// Render the zsh completion descriptor for the declared arguments.
    ///
    /// One quoted `_arguments` entry per option (descriptions included), per
    /// positional, and for the overflow consumer (descriptions suppressed),
    /// joined by ` \` line continuations except after the final entry.
    pub fn completion_script(&self) -> String {
        let mut entries: Vec<String> = Vec::default();

        for slot in &self.named {
            entries.push(slot.completion_entry(false));
        }

        for arg in &self.positionals {
            entries.push(arg.completion_entry(true));
        }

        if let Some(remainder) = &self.remainder {
            entries.push(remainder.arg.completion_entry(true));
        }

        let mut script = format!(
            "#compdef {name}\n\n_arguments \\\n",
            name = self.completion_target()
        );
        // Never empty: the help switch is always declared.
        let last = entries.len() - 1;

        for (index, entry) in entries.iter().enumerate() {
            if index == last {
                script.push_str(&format!("  \"{entry}\"\n"));
            } else {
                script.push_str(&format!("  \"{entry}\" \\\n"));
            }
        }

        script
    }

    /// Write the completion descriptor as `_<program>` (any leading `./`
    /// stripped) under `directory`, returning the path written.
    pub fn write_completion(&self, directory: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = directory.as_ref().join(self.completion_file_name());
        fs::write(&path, self.completion_script())?;
        Ok(path)
    }

    pub(crate) fn completion_file_name(&self) -> String {
        format!("_{name}", name = self.completion_target())
    }

    fn completion_target(&self) -> &str {
        self.program.strip_prefix("./").unwrap_or(&self.program)
    }
}

// Word-wrap without hyphenation; a word longer than `width` overflows its
// line rather than being split.
fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
