//! file: core/src/ir/lower/block_arena.rs
//! description: append-only storage for blocks under construction.
//!
//! Lowering never holds a reference to a block it is building. Every block
//! gets a `BlockId` into `BlockArena`, operators that own regions refer to
//! their bodies by id, and the owned `Operator` tree is only materialized
//! once the whole unit has been lowered. This lets a store be appended to
//! a block that lowering has already left (variable promotion) without
//! aliasing a live list.
//!
use crate::ir::op::{BlockLabel, Operator};

pub type BlockId = usize;

/// A region whose single block still lives in the arena.
#[derive(Debug, Clone)]
pub struct RegionSlot {
    pub block: BlockId,
    pub label: Option<BlockLabel>,
}

/// An operator whose nested regions are still arena blocks.
#[derive(Debug, Clone)]
pub struct StagedOp {
    pub op: Operator,
    pub regions: Vec<RegionSlot>,
}

impl StagedOp {
    pub fn new(op: Operator) -> Self {
        StagedOp { op, regions: Vec::new() }
    }

    pub fn attach_region(&mut self, block: BlockId, label: Option<BlockLabel>) {
        self.regions.push(RegionSlot { block, label });
    }
}

impl From<Operator> for StagedOp {
    fn from(op: Operator) -> Self {
        StagedOp::new(op)
    }
}

#[derive(Debug, Default)]
pub struct BlockArena {
    blocks: Vec<Vec<StagedOp>>,
}

impl BlockArena {
    pub fn new() -> Self {
        BlockArena { blocks: Vec::new() }
    }

    /// Allocate a fresh, empty block.
    pub fn open(&mut self) -> BlockId {
        let id = self.blocks.len();
        self.blocks.push(Vec::new());
        id
    }

    pub fn emit(&mut self, block: BlockId, op: StagedOp) {
        if let Some(items) = self.blocks.get_mut(block) {
            items.push(op);
        }
    }

    pub fn len(&self, block: BlockId) -> usize {
        self.blocks.get(block).map(|b| b.len()).unwrap_or(0)
    }

    /// Build the owned operator tree rooted at `staged`, draining every
    /// block it references. Each block is referenced by exactly one region,
    /// so draining is safe.
    pub fn materialize(&mut self, staged: StagedOp) -> Operator {
        let StagedOp { mut op, regions } = staged;
        for slot in regions {
            let items = self
                .blocks
                .get_mut(slot.block)
                .map(std::mem::take)
                .unwrap_or_default();
            let ops = items.into_iter().map(|s| self.materialize(s)).collect();
            op.push_region(ops, slot.label);
        }
        op
    }
}
