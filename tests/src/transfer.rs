#![cfg(test)]
use tagcrawl_common::plc::scalar::Scalar;
use tagcrawl_common::plc::write::WriteResult;
use tagcrawl_core::tabular::{self, WriteTable};

use crate::util::{LINE_IP, line_plc, service};

#[tokio::test]
async fn pasted_table_is_written_and_reads_back() -> anyhow::Result<()> {
    let plc = line_plc();
    let service = service(&plc);
    let pasted = "BatchCount\t42\tDINT\r\nFiller.Recipe\twater-500\tSTRING\r\nFiller.Drive.Running\tno\tBOOL\r\n";

    let table: WriteTable = tabular::parse_write_table(pasted)?;
    let result: WriteResult = service.write(LINE_IP, &table.writes, None).await?;
    assert_eq!(result.counts(), (3, 0));

    let paths: Vec<String> = table.writes.iter().map(|(path, _)| path.clone()).collect();
    let values = service.read(LINE_IP, &paths, None).await?;

    assert_eq!(values["BatchCount"], Scalar::Int(42));
    assert_eq!(values["Filler.Recipe"], Scalar::Text("water-500".into()));
    assert_eq!(values["Filler.Drive.Running"], Scalar::Bool(false));
    Ok(())
}

#[tokio::test]
async fn unknown_tags_fail_without_stopping_the_batch() -> anyhow::Result<()> {
    let plc = line_plc();
    let table: WriteTable = tabular::parse_write_table("Ghost\t1\tINT\nBatchCount\t7\tDINT\nTmr\t0\tTIMER")?;

    let result: WriteResult = service(&plc).write(LINE_IP, &table.writes, None).await?;

    assert_eq!(table.skipped.len(), 1);
    assert_eq!(result.len(), 2);
    assert_eq!(result.counts(), (1, 1));
    assert_eq!(plc.value("BatchCount"), Some(Scalar::Int(7)));
    Ok(())
}
