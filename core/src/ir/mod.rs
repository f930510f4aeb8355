pub mod lower;
pub mod op;
pub mod printer;
pub mod value;

pub use self::lower::lower_unit as lower_ast_to_ir;
pub use self::op::{AttrValue, Block, BlockLabel, Dialect, FunctionTypeAttr, Operator, Region};
pub use self::printer::render_ir;
pub use self::value::{SimpleType, ValueId};
