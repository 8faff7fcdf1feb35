//! End-to-end flow: compute an allocation, store it, derive
//! settlements and track payment, exercising only the public API.

use shared::models::{
    AdditionalFee, Bill, Discount, Group, GroupMember, Item, ItemAllocation, SettlementStatus,
    SplitConfig, SplitPolicy,
};
use split_engine::money::{minor_unit_exponent, sum_amounts};
use split_engine::{
    AllocationStore, StoreError, compute_allocation, derive_settlements, summarize, update_status,
};

const AT: i64 = 1_755_100_000_000;

/// Warung dinner for three: 130k IDR in items, 10k promo discount,
/// 13k tax, 6.5k service charge and a 3k packaging fee.
fn dinner_bill() -> Bill {
    Bill {
        id: 500,
        merchant_name: "Warung Makan Sederhana".to_string(),
        transaction_date: Some("2025-08-12".to_string()),
        currency: "IDR".to_string(),
        items: vec![
            Item {
                id: 1,
                name: "Nasi Goreng Spesial".to_string(),
                quantity: 2,
                unit_price: 35_000.0,
                total_price: 70_000.0,
                category: Some("main".to_string()),
            },
            Item {
                id: 2,
                name: "Sate Ayam".to_string(),
                quantity: 1,
                unit_price: 45_000.0,
                total_price: 45_000.0,
                category: Some("main".to_string()),
            },
            Item {
                id: 3,
                name: "Es Teh Manis".to_string(),
                quantity: 3,
                unit_price: 5_000.0,
                total_price: 15_000.0,
                category: Some("drink".to_string()),
            },
        ],
        subtotal: 130_000.0,
        discounts: vec![Discount {
            id: 1,
            description: "Opening promo".to_string(),
            amount: 10_000.0,
        }],
        service_charge: 6_500.0,
        tax: 13_000.0,
        additional_fees: vec![AdditionalFee {
            id: 1,
            name: "Packaging".to_string(),
            amount: 3_000.0,
        }],
        total_amount: 142_500.0,
        created_at: AT,
    }
}

fn dinner_group() -> Group {
    Group {
        id: 10,
        name: "Kantor Lama".to_string(),
        members: vec![
            GroupMember {
                id: 1,
                name: "Ana".to_string(),
            },
            GroupMember {
                id: 2,
                name: "Budi".to_string(),
            },
            GroupMember {
                id: 3,
                name: "Citra".to_string(),
            },
        ],
        created_at: AT,
        updated_at: AT,
    }
}

fn dinner_assignments() -> Vec<ItemAllocation> {
    vec![
        ItemAllocation::equal_split(1, &[1, 2]),
        ItemAllocation::equal_split(2, &[3]),
        ItemAllocation::equal_split(3, &[1, 2, 3]),
    ]
}

#[test]
fn test_full_allocation_flow() {
    let bill = dinner_bill();
    let group = dinner_group();
    let split_config = SplitConfig {
        service_charge: SplitPolicy::Equal,
        ..Default::default()
    };

    // 1. Compute the allocation
    let allocation = compute_allocation(&bill, &group, &dinner_assignments(), &split_config, AT)
        .expect("allocation should succeed");

    // Member subtotals: Ana 40k, Budi 40k, Citra 50k.
    // Proportional discount/tax/fees, service charge per head.
    let ana = allocation.member(1).expect("Ana missing");
    assert_eq!(ana.breakdown.subtotal, 40_000.0);
    assert_eq!(ana.breakdown.discount, 3_077.0);
    assert_eq!(ana.breakdown.tax, 4_000.0);
    assert_eq!(ana.breakdown.service_charge, 2_167.0);
    assert_eq!(ana.breakdown.additional_fees, 923.0);
    assert_eq!(ana.breakdown.total, 44_013.0);

    let budi = allocation.member(2).expect("Budi missing");
    assert_eq!(budi.breakdown.total, 44_013.0);

    let citra = allocation.member(3).expect("Citra missing");
    assert_eq!(citra.breakdown.subtotal, 50_000.0);
    assert_eq!(citra.breakdown.tax, 5_000.0);
    assert_eq!(citra.breakdown.total, 54_474.0);

    // Every rupiah of the bill lands on exactly one member
    let exponent = minor_unit_exponent(&bill.currency);
    let allocated = sum_amounts(
        allocation.allocations.iter().map(|a| a.breakdown.total),
        exponent,
    );
    assert_eq!(allocated, bill.total_amount);

    // 2. Store it
    let store = AllocationStore::new();
    let version = store.replace(allocation);
    assert_eq!(version, 1);

    let stored = store.get(group.id).expect("allocation should be stored");
    assert_eq!(stored.version, 1);
    assert_eq!(stored.bill_id, bill.id);

    // 3. Citra fronted the bill; Ana and Budi owe her
    let mut settlements =
        derive_settlements(&stored, 3, AT).expect("settlement derivation should succeed");
    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0].payer_member_id, 1);
    assert_eq!(settlements[0].amount, 44_013.0);
    assert_eq!(settlements[1].payer_member_id, 2);
    assert_eq!(settlements[1].amount, 44_013.0);
    assert!(
        settlements
            .iter()
            .all(|s| s.status == SettlementStatus::Pending)
    );

    // 4. Ana pays; summary splits pending and paid
    update_status(&mut settlements[0], SettlementStatus::Paid, AT + 3_600_000)
        .expect("pending -> paid transition");

    let summary = summarize(&settlements, exponent);
    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.paid_count, 1);
    assert_eq!(summary.pending_count, 1);
    assert_eq!(summary.paid_amount, 44_013.0);
    assert_eq!(summary.pending_amount, 44_013.0);
    assert_eq!(summary.total_amount, 88_026.0);
}

#[test]
fn test_versioned_replace_flow() {
    let bill = dinner_bill();
    let group = dinner_group();
    let store = AllocationStore::new();

    // First writer requires the slot to be empty
    let first = compute_allocation(
        &bill,
        &group,
        &dinner_assignments(),
        &SplitConfig::default(),
        AT,
    )
    .expect("allocation should succeed");
    let version = store
        .replace_if_version(0, first)
        .expect("first write should succeed");
    assert_eq!(version, 1);

    // Recompute with tax split per head instead of proportionally
    let config = SplitConfig {
        tax: SplitPolicy::Equal,
        ..Default::default()
    };
    let second = compute_allocation(&bill, &group, &dinner_assignments(), &config, AT)
        .expect("allocation should succeed");

    // A writer that still thinks the slot is empty must lose
    let err = store
        .replace_if_version(0, second.clone())
        .expect_err("stale write should be rejected");
    assert_eq!(
        err,
        StoreError::VersionConflict {
            group_id: group.id,
            expected: 0,
            actual: 1,
        }
    );

    // Retry against the version actually read
    let version = store
        .replace_if_version(1, second)
        .expect("conditional write should succeed");
    assert_eq!(version, 2);

    let stored = store.get(group.id).expect("allocation should be stored");
    assert_eq!(stored.version, 2);
    // Equal tax shifts a rupiah of tax toward the lighter eaters
    assert_eq!(
        stored.member(1).expect("Ana missing").breakdown.tax,
        4_334.0
    );
    assert_eq!(
        stored.member(3).expect("Citra missing").breakdown.tax,
        4_333.0
    );

    // Totals still conserve after the replacement
    let exponent = minor_unit_exponent(&bill.currency);
    let allocated = sum_amounts(
        stored.allocations.iter().map(|a| a.breakdown.total),
        exponent,
    );
    assert_eq!(allocated, bill.total_amount);
}
