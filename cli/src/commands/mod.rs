pub mod cli;
pub mod detect;
pub mod run;
