//! 注册句柄

use crate::table::{EntryId, RegistrationEntry};
use di_abstractions::Registration;
use infrastructure_common::TypeInfo;

/// 注册句柄
///
/// 注册项的只读快照。同一注册项的句柄相等，重复注册返回的句柄与首次注册相同。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationHandle {
    id: EntryId,
    registered: TypeInfo,
    instantiatable: TypeInfo,
    scope_name: &'static str,
    linked: Option<EntryId>,
}

impl RegistrationHandle {
    pub(crate) fn from_entry(entry: &RegistrationEntry) -> Self {
        Self {
            id: entry.id,
            registered: entry.registered,
            instantiatable: entry.instantiatable,
            scope_name: entry.scope.name(),
            linked: entry.linked,
        }
    }

    /// 注册项编号
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// 关联的注册项编号
    pub fn linked_to(&self) -> Option<EntryId> {
        self.linked
    }
}

impl Registration for RegistrationHandle {
    fn registered_identity(&self) -> TypeInfo {
        self.registered
    }

    fn instantiatable_identity(&self) -> TypeInfo {
        self.instantiatable
    }

    fn scope_name(&self) -> &'static str {
        self.scope_name
    }

    fn is_linked(&self) -> bool {
        self.linked.is_some()
    }
}
