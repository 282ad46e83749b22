//! CSV export of the surface table.

use crate::types::SurfaceRecord;

pub fn surface_csv(records: &[SurfaceRecord]) -> String {
    let mut csv = String::from("index,x,y,nx,ny,u,w,qt,qn,speed,cp,sigma\n");
    for r in records {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}\n",
            r.index, r.x, r.y, r.nx, r.ny, r.u, r.w, r.qt, r.qn, r.speed, r.cp, r.sigma
        ));
    }
    csv
}
