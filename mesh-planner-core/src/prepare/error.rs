use crate::model::GraphError;

#[derive(thiserror::Error, Debug)]
pub enum PrepareError {
    #[error("source node was filtered out or is isolated; it has no connected component")]
    SourceUnreachable,
    #[error("border expansion emptied the prepared graph")]
    GraphEmptied,
    #[error(transparent)]
    Graph(#[from] GraphError),
}
