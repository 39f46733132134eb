use sea_orm::{DatabaseTransaction, DbConn, TransactionTrait};

use blogly_core::error::RepoError;

use super::sea_orm_base::db_err;

/// One atomic sequence of reads and writes.
///
/// Every query of the sequence runs on [`UnitOfWork::conn`]. The work is
/// committed exactly once with [`UnitOfWork::commit`]; dropping it without
/// committing rolls everything back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DbConn) -> Result<Self, RepoError> {
        let txn = db.begin().await.map_err(db_err)?;
        Ok(Self { txn })
    }

    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), RepoError> {
        self.txn.commit().await.map_err(db_err)
    }

    pub async fn rollback(self) -> Result<(), RepoError> {
        self.txn.rollback().await.map_err(db_err)
    }
}
