/// Hitobject related types.
pub mod hit_object;
