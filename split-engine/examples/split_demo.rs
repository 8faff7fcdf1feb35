//! End-to-end walkthrough of the allocation engine.
//!
//! Builds a three-person dinner bill, splits it, stores the result and
//! settles up with the member who fronted the payment.
//!
//! ```sh
//! cargo run -p split-engine --example split_demo
//! ```

use shared::ApiResponse;
use shared::models::{
    AdditionalFee, Bill, Discount, Group, GroupMember, Item, ItemAllocation, SettlementStatus,
    SplitConfig, SplitPolicy,
};
use shared::util::now_millis;
use split_engine::money::minor_unit_exponent;
use split_engine::{
    AllocationStore, compute_allocation, derive_settlements, summarize, update_status,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "split_engine=info".into()),
        )
        .init();

    let now = now_millis();

    // 1. A scanned dinner bill, already normalized to items and charges
    let bill = Bill {
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
        created_at: now,
    };

    let group = Group {
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
        created_at: now,
        updated_at: now,
    };

    // 2. Who had what: nasi goreng shared by Ana and Budi, sate for
    //    Citra, iced tea all around
    let item_allocations = vec![
        ItemAllocation::equal_split(1, &[1, 2]),
        ItemAllocation::equal_split(2, &[3]),
        ItemAllocation::equal_split(3, &[1, 2, 3]),
    ];

    // 3. Proportional by default, service charge per head
    let split_config = SplitConfig {
        service_charge: SplitPolicy::Equal,
        ..Default::default()
    };

    let allocation = compute_allocation(&bill, &group, &item_allocations, &split_config, now)?;

    // The payload as a caller would receive it
    let response = ApiResponse::success(&allocation);
    println!("{}", serde_json::to_string_pretty(&response)?);

    // 4. Keep the latest result per group
    let store = AllocationStore::new();
    let version = store.replace(allocation);
    println!("stored allocation for group {} at version {version}", group.id);

    // 5. Ana fronted the bill, so everyone else owes her
    let stored = store
        .get(group.id)
        .ok_or_else(|| anyhow::anyhow!("allocation missing for group {}", group.id))?;
    let mut settlements = derive_settlements(&stored, 1, now_millis())?;
    for settlement in &settlements {
        println!(
            "{} owes {} {}",
            settlement.payer_name, settlement.amount, bill.currency
        );
    }

    // 6. Budi pays up
    update_status(&mut settlements[0], SettlementStatus::Paid, now_millis())?;

    let exponent = minor_unit_exponent(&bill.currency);
    let summary = summarize(&settlements, exponent);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
