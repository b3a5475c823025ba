mod rot128;
#[cfg(test)]
mod tests;

pub use rot128::decrypt;
