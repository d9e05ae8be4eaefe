pub trait Also: Sized {
    fn also(self, f: impl FnOnce(&Self)) -> Self;
    fn also_mut(self, f: impl FnOnce(&mut Self)) -> Self;
}

impl<T> Also for T {
    fn also(self, f: impl FnOnce(&Self)) -> Self {
        f(&self);
        self
    }

    fn also_mut(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }
}
