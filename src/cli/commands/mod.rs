pub mod rotate_command;
