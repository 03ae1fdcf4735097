pub mod shell;

pub use shell::{CommandRunner, ShellRunner};
