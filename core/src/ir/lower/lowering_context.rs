//! file: core/src/ir/lower/lowering_context.rs
//! description: mutable state carried through one lowering pass.
//!
//! `LoweringContext` owns the insertion-point stack (the block currently
//! receiving operators), the per-function variable scopes that drive
//! SSA/memory promotion, and the flat name -> declared type map. Stacks
//! are pushed and popped in the same order as the source tree nests.
//!
use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use super::block_arena::{BlockArena, BlockId, StagedOp};
use crate::ir::value::{SimpleType, ValueId};

/// What kind of definition body lowering is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionSite {
    Module,
    Class,
    Function,
}

/// Where a source variable lives at this point of the pass.
#[derive(Debug, Clone, PartialEq)]
pub enum VarState {
    Undefined,
    /// Single live SSA definition held in `block`.
    Pending { block: BlockId, value: ValueId },
    /// Promoted: reads and writes go through load/store.
    Memory,
}

/// Variables of one function body (or the module body). Loops, branches
/// and class bodies share the scope of the enclosing function.
#[derive(Debug, Default)]
struct VariableScope {
    pending: HashMap<String, (BlockId, ValueId)>,
    memory: HashSet<String>,
}

#[derive(Debug)]
pub struct LoweringContext {
    pub arena: BlockArena,
    insertion_points: Vec<BlockId>,
    scopes: Vec<VariableScope>,
    sites: Vec<DefinitionSite>,
    types: HashMap<String, SimpleType>,
    /// `%name` ids already handed out anywhere in the unit.
    taken: HashSet<ValueId>,
    next_id: usize,
}

impl LoweringContext {
    /// Create a context with the module scope already open.
    pub fn new() -> Self {
        LoweringContext {
            arena: BlockArena::new(),
            insertion_points: Vec::new(),
            scopes: vec![VariableScope::default()],
            sites: vec![DefinitionSite::Module],
            types: HashMap::new(),
            taken: HashSet::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let n = self.next_id;
        self.next_id += 1;
        n
    }

    // ---------------------------------------------------------------
    // Insertion points

    /// Open a fresh block and make it the insertion point.
    pub fn enter_block(&mut self) -> BlockId {
        let block = self.arena.open();
        self.insertion_points.push(block);
        trace!("enter block {} (depth {})", block, self.insertion_points.len());
        block
    }

    /// Stop appending to `block`; the enclosing block becomes current again.
    pub fn leave_block(&mut self, block: BlockId) {
        let popped = self.insertion_points.pop();
        debug_assert_eq!(popped, Some(block), "insertion points left out of order");
        trace!("leave block {} ({} ops)", block, self.arena.len(block));
    }

    pub fn current_block(&self) -> BlockId {
        self.insertion_points.last().copied().unwrap_or_default()
    }

    /// Append to the current insertion point.
    pub fn emit(&mut self, op: impl Into<StagedOp>) {
        let block = self.current_block();
        self.arena.emit(block, op.into());
    }

    /// Append to an arbitrary block, including one already left.
    pub fn emit_into(&mut self, block: BlockId, op: impl Into<StagedOp>) {
        self.arena.emit(block, op.into());
    }

    // ---------------------------------------------------------------
    // Scopes

    pub fn push_function_scope(&mut self) {
        self.scopes.push(VariableScope::default());
        self.sites.push(DefinitionSite::Function);
    }

    pub fn pop_function_scope(&mut self) {
        self.scopes.pop();
        self.sites.pop();
    }

    pub fn push_class_site(&mut self) {
        self.sites.push(DefinitionSite::Class);
    }

    pub fn pop_class_site(&mut self) {
        self.sites.pop();
    }

    pub fn site(&self) -> DefinitionSite {
        self.sites.last().copied().unwrap_or(DefinitionSite::Module)
    }

    pub fn in_function(&self) -> bool {
        self.site() == DefinitionSite::Function
    }

    fn scope(&self) -> Option<&VariableScope> {
        self.scopes.last()
    }

    fn scope_mut(&mut self) -> &mut VariableScope {
        if self.scopes.is_empty() {
            self.scopes.push(VariableScope::default());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn var_state(&self, name: &str) -> VarState {
        let Some(scope) = self.scope() else {
            return VarState::Undefined;
        };
        if scope.memory.contains(name) {
            VarState::Memory
        } else if let Some((block, value)) = scope.pending.get(name) {
            VarState::Pending { block: *block, value: value.clone() }
        } else {
            VarState::Undefined
        }
    }

    // ---------------------------------------------------------------
    // Value names

    /// Unique name for an anonymous expression result.
    pub fn fresh_temp(&mut self) -> ValueId {
        let n = self.next_id();
        ValueId::numbered(n)
    }

    /// `%name` the first time `name` is defined in the unit, `%name.n`
    /// afterwards, so a nested function never reuses an outer id.
    pub fn fresh_definition(&mut self, name: &str) -> ValueId {
        let plain = ValueId::named(name);
        if self.taken.insert(plain.clone()) {
            plain
        } else {
            self.fresh_version(name)
        }
    }

    pub fn fresh_version(&mut self, name: &str) -> ValueId {
        let n = self.next_id();
        ValueId::versioned(name, n)
    }

    // ---------------------------------------------------------------
    // SSA / memory state

    /// Record `value` as the single live definition of `name`, held in the
    /// current block.
    pub fn define_pending(&mut self, name: &str, value: ValueId) {
        let block = self.current_block();
        self.define_pending_in(name, value, block);
    }

    pub fn define_pending_in(&mut self, name: &str, value: ValueId, block: BlockId) {
        let scope = self.scope_mut();
        scope.memory.remove(name);
        scope.pending.insert(name.to_string(), (block, value));
    }

    /// Bind a formal parameter of the function whose entry block is `entry`.
    pub fn bind_parameter(&mut self, name: &str, ty: SimpleType, entry: BlockId) -> ValueId {
        let value = self.fresh_definition(name);
        self.define_pending_in(name, value.clone(), entry);
        self.declare_type(name, ty);
        value
    }

    /// Move `name` from pending-SSA to memory. Returns the block and value
    /// of the definition that was pending.
    pub fn promote(&mut self, name: &str) -> Option<(BlockId, ValueId)> {
        let scope = self.scope_mut();
        let pending = scope.pending.remove(name);
        scope.memory.insert(name.to_string());
        if let Some((block, value)) = &pending {
            debug!("promoting `{}` to memory (definition {} in block {})", name, value, block);
        }
        pending
    }

    pub fn mark_memory(&mut self, name: &str) {
        if self.scope_mut().memory.insert(name.to_string()) {
            debug!("`{}` now lives in memory", name);
        }
    }

    // ---------------------------------------------------------------
    // Declared types

    pub fn declare_type(&mut self, name: &str, ty: SimpleType) {
        self.types.insert(name.to_string(), ty);
    }

    pub fn declared_type(&self, name: &str) -> Option<&SimpleType> {
        self.types.get(name)
    }

    /// Declared type of `name`, or the unknown tag.
    pub fn type_of(&self, name: &str) -> SimpleType {
        self.types.get(name).cloned().unwrap_or(SimpleType::Unknown)
    }
}

impl Default for LoweringContext {
    fn default() -> Self {
        LoweringContext::new()
    }
}
