mod session_box;
mod token;

#[cfg(test)]
mod test_utils;

pub use session_box::SessionBox;
