//! # Maximum bipartite matching between cost entries and pool tokens
//!
//! Implementation based on the "Alternate Approach" from
//! http://olympiad.cs.uct.ac.za/presentations/camp2_2017/bipartitematching-robin.pdf

/// Returns, for each of the `cost_count` rows, the column it was matched with,
/// or None if no matching covers every row.
/// `edges` is a row-major `cost_count` x `token_count` adjacency matrix.
pub fn complete_matching(
  edges: &[bool],
  cost_count: usize,
  token_count: usize,
) -> Option<Vec<usize>> {
  debug_assert_eq!(edges.len(), cost_count * token_count);
  if cost_count > token_count {
    return None;
  }
  let mut seen = vec![false; token_count];
  // matches[token] = cost row currently holding that token
  let mut matches: Vec<Option<usize>> = vec![None; token_count];
  for row in 0..cost_count {
    for s in seen.iter_mut() {
      *s = false;
    }
    if !augment(edges, token_count, row, &mut seen, &mut matches) {
      return None;
    }
  }
  let mut assignment = vec![0; cost_count];
  for (token, row) in matches.iter().enumerate() {
    if let Some(row) = row {
      assignment[*row] = token;
    }
  }
  Some(assignment)
}

fn augment(
  edges: &[bool],
  token_count: usize,
  row: usize,
  seen: &mut Vec<bool>,
  matches: &mut Vec<Option<usize>>,
) -> bool {
  for token in 0..token_count {
    if !edges[row * token_count + token] || seen[token] {
      continue;
    }
    seen[token] = true;
    // Is this token free, or can the row holding it move to another token?
    let available = match matches[token] {
      None => true,
      Some(other) => augment(edges, token_count, other, seen, matches),
    };
    if available {
      matches[token] = Some(row);
      return true;
    }
  }
  false
}
