use crate::{ConstraintId, ConstraintVariableGraph, ReducedAdjacency, VariableId};
use std::fmt::{Debug, Error, Formatter};

impl ConstraintVariableGraph {
    /// Compute the reduced adjacency matrix of this graph: one row per
    /// constraint, one column per variable, a set bit wherever the constraint
    /// references the variable.
    ///
    /// The matrix is built directly from the incidence lists. Row and column
    /// order follow the iteration order of `constraints()` and `variables()`;
    /// the companion id lists returned inside the result are authoritative for
    /// interpreting matrix indices.
    pub fn reduced_adjacency(&self) -> ReducedAdjacency {
        let rows: Vec<ConstraintId> = self.constraints().collect();
        let columns: Vec<VariableId> = self.variables().collect();
        let mut matrix = Vec::with_capacity(rows.len());
        for constraint in &rows {
            let mut row = bitvector::BitVector::new(columns.len());
            for variable in self.constraint_variables(*constraint) {
                row.insert(variable.to_index());
            }
            matrix.push(row);
        }
        ReducedAdjacency {
            rows,
            columns,
            matrix,
        }
    }
}

impl ReducedAdjacency {
    /// The number of constraint rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The number of variable columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Ordered constraint ids; the i-th entry identifies the i-th matrix row.
    pub fn rows(&self) -> &[ConstraintId] {
        &self.rows
    }

    /// Ordered variable ids; the j-th entry identifies the j-th matrix column.
    pub fn columns(&self) -> &[VariableId] {
        &self.columns
    }

    /// True iff the constraint of row `row` references the variable of
    /// column `column`.
    pub fn is_incident(&self, row: usize, column: usize) -> bool {
        self.matrix[row].contains(column)
    }
}

/* The underlying bitvector type does not implement Eq, but the matrix is a plain value. */
impl Eq for ReducedAdjacency {}

impl Debug for ReducedAdjacency {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "ReducedAdjacency({}x{})[",
            self.num_rows(),
            self.num_columns()
        )?;
        for row in 0..self.num_rows() {
            if row != 0 {
                write!(f, " ")?;
            }
            for column in 0..self.num_columns() {
                write!(f, "{}", if self.is_incident(row, column) { 1 } else { 0 })?;
            }
        }
        write!(f, "]")?;
        Ok(())
    }
}
