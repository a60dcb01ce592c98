//! 注册表
//!
//! 注册项保存在以 [`EntryId`] 为键的集合中，按类型标识归档的只是编号。
//! 移除类型时撤销归档并释放注册项，仍被其他归档注册项关联的注册项保留，
//! 直到最后一个关联它的别名也被移除。

use di_abstractions::{Activator, InterfaceCaster, Scope};
use infrastructure_common::{ResolveError, TypeInfo};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// 注册项编号
///
/// 在同一个容器内单调递增，清空注册表后也不会复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    /// 编号数值
    pub fn value(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 注册项
pub(crate) struct RegistrationEntry {
    pub id: EntryId,
    pub registered: TypeInfo,
    pub instantiatable: TypeInfo,
    pub scope: Arc<dyn Scope>,
    pub activator: Activator,
    pub caster: InterfaceCaster,
    pub linked: Option<EntryId>,
}

impl fmt::Debug for RegistrationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationEntry")
            .field("id", &self.id)
            .field("registered", &self.registered.name)
            .field("instantiatable", &self.instantiatable.name)
            .field("scope", &self.scope.name())
            .field("linked", &self.linked)
            .finish()
    }
}

/// 选中的注册项
///
/// `entry` 决定返回的接口类型，`authority` 是沿关联找到的注册项，
/// 由它的作用域和激活器生成实例。
#[derive(Debug, Clone)]
pub(crate) struct Selected {
    pub entry: Arc<RegistrationEntry>,
    pub authority: Arc<RegistrationEntry>,
}

/// 注册表
#[derive(Default)]
pub(crate) struct RegistryTable {
    next_id: u64,
    entries: HashMap<EntryId, Arc<RegistrationEntry>>,
    filed: HashMap<TypeInfo, Vec<EntryId>>,
}

impl RegistryTable {
    /// 查找 (注册类型, 具体类型) 对应的注册项
    pub fn find(&self, registered: TypeInfo, instantiatable: TypeInfo) -> Option<Arc<RegistrationEntry>> {
        self.filed_entries(registered)
            .find(|entry| entry.instantiatable == instantiatable)
    }

    /// 新增注册项并归档到 `registered` 下
    pub fn insert(
        &mut self,
        registered: TypeInfo,
        activator: Activator,
        scope: Arc<dyn Scope>,
        caster: InterfaceCaster,
        linked: Option<EntryId>,
    ) -> Arc<RegistrationEntry> {
        self.next_id += 1;
        let id = EntryId(self.next_id);
        let entry = Arc::new(RegistrationEntry {
            id,
            registered,
            instantiatable: activator.type_info(),
            scope,
            activator,
            caster,
            linked,
        });
        self.entries.insert(id, Arc::clone(&entry));
        self.filed.entry(registered).or_default().push(id);
        entry
    }

    /// 按请求类型和限定类型选择唯一的注册项
    pub fn select(&self, requested: TypeInfo, qualifier: TypeInfo) -> Result<Selected, ResolveError> {
        let mut candidates = self.filed_entries(requested).peekable();
        if candidates.peek().is_none() {
            return Err(ResolveError::NotRegistered {
                type_info: requested,
            });
        }

        let entry = if qualifier == requested {
            let candidates: Vec<_> = candidates.collect();
            if candidates.len() > 1 {
                return Err(ResolveError::AmbiguousCandidates {
                    type_info: requested,
                    candidates: candidates.iter().map(|entry| entry.instantiatable).collect(),
                });
            }
            candidates.into_iter().next()
        } else {
            candidates.find(|entry| entry.instantiatable == qualifier)
        };

        entry
            .map(|entry| self.selected(entry))
            .ok_or(ResolveError::QualifierNotRegistered {
                type_info: requested,
                qualifier,
            })
    }

    /// 请求类型下的全部注册项，按注册顺序
    pub fn candidates(&self, requested: TypeInfo) -> Result<Vec<Selected>, ResolveError> {
        let selected: Vec<_> = self
            .filed_entries(requested)
            .map(|entry| self.selected(entry))
            .collect();
        if selected.is_empty() {
            return Err(ResolveError::NotRegistered {
                type_info: requested,
            });
        }
        Ok(selected)
    }

    /// 用关联注册项替换已有的注册项，保持其在归档中的位置
    pub fn replace(
        &mut self,
        existing: EntryId,
        activator: Activator,
        scope: Arc<dyn Scope>,
        caster: InterfaceCaster,
        linked: Option<EntryId>,
    ) -> Option<Arc<RegistrationEntry>> {
        let registered = self.entries.get(&existing)?.registered;
        let filed = self.filed.get_mut(&registered)?;
        let position = filed.iter().position(|id| *id == existing)?;
        self.next_id += 1;
        let id = EntryId(self.next_id);
        filed[position] = id;

        let entry = Arc::new(RegistrationEntry {
            id,
            registered,
            instantiatable: activator.type_info(),
            scope,
            activator,
            caster,
            linked,
        });
        self.entries.insert(id, Arc::clone(&entry));
        self.prune();
        Some(entry)
    }

    /// 移除某类型下的全部注册项，返回移除的数量
    pub fn remove(&mut self, registered: TypeInfo) -> usize {
        let removed = self.filed.remove(&registered).map_or(0, |ids| ids.len());
        if removed > 0 {
            self.prune();
        }
        removed
    }

    /// 清空注册表，返回清除的注册项数量
    pub fn clear(&mut self) -> usize {
        let count = self.registration_count();
        self.filed.clear();
        self.entries.clear();
        count
    }

    /// 是否存在 `registered` 下的注册项
    pub fn contains(&self, registered: TypeInfo) -> bool {
        self.filed.get(&registered).is_some_and(|ids| !ids.is_empty())
    }

    /// 已归档的类型标识数量
    pub fn identity_count(&self) -> usize {
        self.filed.len()
    }

    /// 已归档的注册项数量
    pub fn registration_count(&self) -> usize {
        self.filed.values().map(Vec::len).sum()
    }

    /// 释放既未归档、也未被归档注册项关联的注册项
    fn prune(&mut self) {
        let mut live = HashSet::new();
        let mut pending: Vec<EntryId> = self.filed.values().flatten().copied().collect();
        while let Some(id) = pending.pop() {
            if live.insert(id) {
                if let Some(linked) = self.entries.get(&id).and_then(|entry| entry.linked) {
                    pending.push(linked);
                }
            }
        }
        self.entries.retain(|id, _| live.contains(id));
    }

    #[cfg(test)]
    fn stored_count(&self) -> usize {
        self.entries.len()
    }

    fn filed_entries(&self, registered: TypeInfo) -> impl Iterator<Item = Arc<RegistrationEntry>> + '_ {
        self.filed
            .get(&registered)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.entries.get(id).cloned())
    }

    fn selected(&self, entry: Arc<RegistrationEntry>) -> Selected {
        let mut authority = Arc::clone(&entry);
        // 关联只指向更早创建的注册项，不会成环
        while let Some(linked) = authority.linked.and_then(|id| self.entries.get(&id)) {
            authority = Arc::clone(linked);
        }
        Selected { entry, authority }
    }
}
