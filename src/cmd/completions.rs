//! Completions command implementation
//!
//! Handles the `src-slim completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Writes the completion script for `cmd` to `out`. Users can redirect this
/// to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// src-slim completions bash > /etc/bash_completion.d/src-slim
///
/// # Zsh
/// src-slim completions zsh > ~/.zfunc/_src-slim
///
/// # Fish
/// src-slim completions fish > ~/.config/fish/completions/src-slim.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn sample_command() -> Command {
        Command::new("src-slim")
            .subcommand(Command::new("minify").arg(Arg::new("dir")))
            .subcommand(Command::new("clean"))
    }

    #[test]
    fn test_cmd_completions_all_shells_generate_output() {
        let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish];

        for shell in shells {
            let mut out = Vec::new();
            cmd_completions(shell, &mut sample_command(), &mut out);
            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("minify"), "{} script lacks subcommands", shell);
        }
    }
}
