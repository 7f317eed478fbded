mod logout_tests;
mod rotation_tests;
