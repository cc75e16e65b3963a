/// Maps a function to (an approximation of) its first derivative.
pub trait DifferentialOperator<T> {
    type Output;

    fn derive(&self, function: T) -> Self::Output;
}
