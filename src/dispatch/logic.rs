//! Pure decision functions, separated from OS access so they can be
//! unit-tested without a process table.

use crate::config::FACTORY_FLAG;

/// What the command line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// No arguments: look for a running system shell first.
    AutoDetect,
    /// `/factory…`: start the original shell unconditionally.
    ForceOriginal,
    /// Any other argument: start the replacement shell unconditionally.
    ForceReplacement,
}

/// Which executable is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellChoice {
    Replacement,
    Original,
}

/// Classify the arguments following the program name. Only the first one is
/// looked at; `/factory` is matched as a case-sensitive prefix.
pub fn parse_invocation<A: AsRef<str>>(args: &[A]) -> Invocation {
    match args.first() {
        None => Invocation::AutoDetect,
        Some(arg) if arg.as_ref().starts_with(FACTORY_FLAG) => Invocation::ForceOriginal,
        Some(_) => Invocation::ForceReplacement,
    }
}

/// Pick the shell for an invocation. `shell_running` is only consulted for
/// [`Invocation::AutoDetect`].
pub fn choose_shell(invocation: Invocation, shell_running: impl FnOnce() -> bool) -> ShellChoice {
    match invocation {
        Invocation::AutoDetect if shell_running() => ShellChoice::Replacement,
        Invocation::AutoDetect => ShellChoice::Original,
        Invocation::ForceOriginal => ShellChoice::Original,
        Invocation::ForceReplacement => ShellChoice::Replacement,
    }
}
