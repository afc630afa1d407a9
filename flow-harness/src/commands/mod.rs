pub mod generate;
pub mod launch;
pub mod run;
