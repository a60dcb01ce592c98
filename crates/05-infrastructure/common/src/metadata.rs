//! 元数据定义
//!
//! 提供运行时类型标识

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 运行时类型标识。相等性和哈希只取决于 [`TypeId`]，
/// 名称仅用于日志和错误消息。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（包含模块路径）
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    ///
    /// 支持未定长类型，因此 `dyn Trait` 也可以作为类型标识。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 去掉最外层类型的模块路径，泛型参数保持不变
fn short_type_name(name: &'static str) -> &'static str {
    let head = name
        .find('<')
        .map_or(name, |generic_start| &name[..generic_start]);
    head.rfind("::")
        .map_or(name, |separator| &name[separator + 2..])
}
