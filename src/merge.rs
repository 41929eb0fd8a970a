//! 配置合并
//!
//! 以一份完整的默认值为底，叠加一份部分配置。叠加层中为 `None` 的字段
//! 不会覆盖默认值；结果类型只包含底层已有的字段，叠加层多出的键被丢弃。

/// Overlay a partial value onto a complete one, producing a new complete value.
pub trait Merge<Overlay> {
    fn merge(&self, overlay: &Overlay) -> Self;
}

/// `first` 中的每个字段取 `second` 的同名字段（若其不为 `None`），否则保留 `first` 的值
pub fn merge<T, U>(first: &T, second: &U) -> T
where
    T: Merge<U>,
{
    first.merge(second)
}

/// Field-level rule: an absent overlay value never erases the base.
pub fn overlay_field<T: Clone>(base: &T, overlay: &Option<T>) -> T {
    match overlay {
        Some(value) => value.clone(),
        None => base.clone(),
    }
}
