mod common;

mod session;
