pub mod use_toaster;
