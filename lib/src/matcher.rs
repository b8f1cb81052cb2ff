//! # Resource matcher
//!
//! Decides whether a pool of produced units can pay an ordered cost, and commits the payment.
//!
//! The first pass is greedy:
//! 1. Sort the pool by specificity so that the least flexible tokens are spent first:
//!    concrete units, then generic units, then OneOf units, and within each group the tokens
//!    with the fewest duplicates in the pool.
//! 2. Sort the cost by how picky each entry is: concrete requirements, then OneOf requirements,
//!    then generic requirements.
//! 3. For each cost entry take the first compatible token that is still unused.
//!
//! The greedy pass can reject a payable cost when flexible tokens are spread across flexible
//! requirements, so a rejected cost is retried with an exact bipartite matching before the
//! matcher gives up.
use crate::bipartite::complete_matching;
use crate::error::Error;
use crate::mana::{compatible, Mana};

fn token_rank(mana: &Mana) -> u8 {
  match mana {
    Mana::Concrete(_) => 0,
    Mana::Generic => 1,
    Mana::OneOf(_) => 2,
  }
}

fn requirement_rank(mana: &Mana) -> u8 {
  match mana {
    Mana::Concrete(_) => 0,
    Mana::OneOf(_) => 1,
    Mana::Generic => 2,
  }
}

/// Returns pool indices in the order the greedy pass considers them
pub fn order_pool(pool: &[Mana]) -> Vec<usize> {
  let mut order: Vec<usize> = (0..pool.len()).collect();
  // sort_by_key is stable, so equal tokens keep their pool order
  order.sort_by_key(|&i| {
    let duplicates = pool.iter().filter(|m| **m == pool[i]).count();
    (token_rank(&pool[i]), duplicates)
  });
  order
}

fn order_cost(cost: &[Mana]) -> Vec<usize> {
  let mut order: Vec<usize> = (0..cost.len()).collect();
  order.sort_by_key(|&i| requirement_rank(&cost[i]));
  order
}

/// Returns the pool indices consumed by the greedy pass, or None if it gets stuck
fn greedy_assignment(pool: &[Mana], cost: &[Mana]) -> Option<Vec<usize>> {
  let pool_order = order_pool(pool);
  let mut used = vec![false; pool.len()];
  let mut spent = Vec::with_capacity(cost.len());
  for entry in order_cost(cost) {
    let token = pool_order
      .iter()
      .copied()
      .find(|&t| !used[t] && compatible(&pool[t], &cost[entry]))?;
    used[token] = true;
    spent.push(token);
  }
  Some(spent)
}

fn exact_assignment(pool: &[Mana], cost: &[Mana]) -> Option<Vec<usize>> {
  let mut edges = Vec::with_capacity(cost.len() * pool.len());
  for required in cost {
    for produced in pool {
      edges.push(compatible(produced, required));
    }
  }
  complete_matching(&edges, cost.len(), pool.len())
}

/// Returns the pool indices that would pay `cost`, or None if it cannot be paid
pub fn assignment(pool: &[Mana], cost: &[Mana]) -> Option<Vec<usize>> {
  if cost.len() > pool.len() {
    return None;
  }
  greedy_assignment(pool, cost).or_else(|| exact_assignment(pool, cost))
}

/// Returns true if `pool` can pay `cost`. An empty cost is always payable.
pub fn can_pay(pool: &[Mana], cost: &[Mana]) -> bool {
  cost.is_empty() || assignment(pool, cost).is_some()
}

/// Removes one compatible token per cost entry from `pool`.
/// On failure the pool is left untouched.
pub fn pay(pool: &mut Vec<Mana>, cost: &[Mana]) -> Result<(), Error> {
  let mut spent = assignment(pool, cost).ok_or_else(|| {
    let cost_str: Vec<String> = cost.iter().map(|m| m.to_string()).collect();
    Error::UnpayableCost(cost_str.join(" "))
  })?;
  spent.sort_unstable_by(|a, b| b.cmp(a));
  for i in spent {
    pool.remove(i);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::mana::*;
  use crate::matcher::*;

  const G: Mana = Mana::Concrete(ManaColor::Green);
  const R: Mana = Mana::Concrete(ManaColor::Red);
  const U: Mana = Mana::Concrete(ManaColor::Blue);
  const C: Mana = Mana::Concrete(ManaColor::Colorless);

  fn gu() -> Mana {
    Mana::one_of(&[ManaColor::Green, ManaColor::Blue])
  }

  #[test]
  fn empty_cost_is_always_payable() {
    assert!(can_pay(&[], &[]));
    assert!(can_pay(&[G, R], &[]));
    let mut pool = vec![G];
    pay(&mut pool, &[]).unwrap();
    assert_eq!(pool, vec![G]);
  }

  #[test]
  fn colored_and_generic_in_any_order() {
    let costs = [vec![R, Mana::Generic], vec![Mana::Generic, R]];
    let pools = [vec![C, R], vec![R, C]];
    for cost in &costs {
      for pool in &pools {
        let mut pool = pool.clone();
        assert!(can_pay(&pool, cost));
        pay(&mut pool, cost).unwrap();
        assert!(pool.is_empty());
      }
    }
  }

  #[test]
  fn failed_payment_leaves_pool_alone() {
    let mut pool = vec![G, C, R];
    assert!(!can_pay(&pool, &[U, Mana::Generic]));
    assert!(pay(&mut pool, &[U, Mana::Generic]).is_err());
    assert_eq!(pool, vec![G, C, R]);
  }

  #[test]
  fn payment_removes_one_token_per_entry() {
    let mut pool = vec![G, gu(), C, G, Mana::any_color()];
    pay(&mut pool, &[G, Mana::Generic]).unwrap();
    assert_eq!(pool.len(), 3);
    // the OneOf tokens are the most flexible and survive
    assert!(pool.contains(&gu()));
    assert!(pool.contains(&Mana::any_color()));
  }

  #[test]
  fn generic_spends_concrete_before_flexible() {
    let mut pool = vec![Mana::any_color(), C];
    pay(&mut pool, &[Mana::Generic]).unwrap();
    assert_eq!(pool, vec![Mana::any_color()]);
  }

  #[test]
  fn not_enough_tokens() {
    assert!(!can_pay(&[G], &[G, G]));
  }

  #[test]
  fn specificity_order() {
    let pool = vec![gu(), Mana::Generic, G, G, R];
    let order = order_pool(&pool);
    // R is concrete with no duplicates, then the two G, then generic, then OneOf
    assert_eq!(order, vec![4, 2, 3, 1, 0]);
  }

  #[test]
  fn exact_matching_rescues_greedy() {
    // greedy hands the first OneOf token to the first OneOf requirement, which leaves
    // nothing red for the second one
    let gr = Mana::one_of(&[ManaColor::Green, ManaColor::Red]);
    let ub = Mana::one_of(&[ManaColor::Blue, ManaColor::Black]);
    let rb = Mana::one_of(&[ManaColor::Red, ManaColor::Black]);
    let pool = vec![gr.clone(), rb.clone(), C];
    let cost = vec![rb.clone(), Mana::one_of(&[ManaColor::Green, ManaColor::Blue]), Mana::Generic];
    assert!(greedy_assignment(&pool, &cost).is_none());
    assert!(can_pay(&pool, &cost));
    let mut paid = pool.clone();
    pay(&mut paid, &cost).unwrap();
    assert!(paid.is_empty());
    assert!(!can_pay(&[gr, ub], &[R, R]));
  }
}
