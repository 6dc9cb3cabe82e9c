pub mod when;
