use super::*;

pub trait Modifiable
where
    Self: Sized,
{
    type Constructor;
    fn current_index(&self) -> usize;
    fn slice(&mut self) -> &mut [Self::Constructor];
    fn modify<F>(mut self, closure: F) -> Self
    where
        F: Fn(&mut Self::Constructor),
    {
        let current_index = self.current_index();
        self.slice()
            .iter_mut()
            .skip(current_index)
            .for_each(closure);

        self
    }

    fn modify_idx<F>(mut self, closure: F) -> Self
    where
        F: Fn(usize, &mut Self::Constructor),
    {
        let current_index = self.current_index();
        self.slice()
            .iter_mut()
            .enumerate()
            .skip(current_index)
            .for_each(|(idx, c)| closure(idx - current_index, c));

        self
    }
}

macro_rules! impl_modifiable {
    ($type: ty, $constructor: ty, $($field_path:ident).+) => {
        impl Modifiable for $type {
            type Constructor = $constructor;
            fn current_index(&self) -> usize {
                self.current_index
            }
            fn slice(&mut self) -> &mut [Self::Constructor] {
                &mut self.$($field_path).+
            }
        }
    };
}

impl_modifiable!(BerthBuilder, BerthConstructor, state.berths);
impl_modifiable!(ShipBuilder, ShipConstructor, state.ships);
impl_modifiable!(
    DockingRequestBuilder,
    DockingRequestConstructor,
    state.state.docking_requests
);
impl_modifiable!(
    AssignmentBuilder,
    AssignmentConstructor,
    state.state.assignments
);
