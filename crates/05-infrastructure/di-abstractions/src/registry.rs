//! 组件注册抽象接口

use infrastructure_common::TypeInfo;

/// 注册选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationOption {
    /// 同时以具体类型注册
    ///
    /// 附加的具体类型注册关联到主注册，两条解析路径共享同一作用域产生的实例。
    /// 注册类型与具体类型相同时不可使用。
    AddConcreteTypeRegistration,
}

/// 注册项 trait
///
/// 注册项在注册时创建，关联关系也只在创建时建立，此后不再修改。
pub trait Registration: Send + Sync {
    /// 注册时使用的类型标识
    fn registered_identity(&self) -> TypeInfo;

    /// 实际创建的具体类型标识，用作限定类型
    fn instantiatable_identity(&self) -> TypeInfo;

    /// 作用域名称
    fn scope_name(&self) -> &'static str;

    /// 是否关联到另一个注册项
    fn is_linked(&self) -> bool;
}
