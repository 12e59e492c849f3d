use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::errors::SoulboundError;
use crate::state::{IndexSlot, SlotBytes};

// =============================================================================
// ACCOUNT HELPERS
// =============================================================================
//
// Most PDAs are declared in the `Accounts` structs. Slot accounts and a few
// optional accounts depend on values only known inside the handler, so they
// are checked, created and (de)serialized here.
// =============================================================================

/// State stored in a program-owned account, `None` while the account holds none
pub fn read_state<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }

    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice).map(Some)
}

pub fn store_state<T: AccountSerialize>(info: &AccountInfo, state: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    state.try_serialize(&mut writer)
}

/// Check that `info` is the PDA of `seeds` and return its bump
pub fn expect_pda(info: &AccountInfo, seeds: &[&[u8]]) -> Result<u8> {
    let (address, bump) = Pubkey::find_program_address(seeds, &crate::ID);
    require_keys_eq!(*info.key, address, SoulboundError::AccountMismatch);
    Ok(bump)
}

/// Allocate `space` bytes for the PDA `info` of `seeds`, rent paid by `payer`.
/// Lamports already sitting on the address count towards rent.
pub fn create_pda<'info>(
    info: &AccountInfo<'info>,
    seeds: &[&[u8]],
    bump: u8,
    space: usize,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let bump = [bump];
    let mut signer = seeds.to_vec();
    signer.push(&bump);
    let signer_seeds: &[&[&[u8]]] = &[&signer];

    let rent = Rent::get()?.minimum_balance(space);
    let balance = info.lamports();

    if balance == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: info.clone(),
                },
                signer_seeds,
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    let shortfall = rent.saturating_sub(balance);
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer.clone(),
                    to: info.clone(),
                },
            ),
            shortfall,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: info.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: info.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}

/// Write `item` into slot `position` of the list owned by `owner`,
/// creating the slot account on first use.
pub fn write_slot<'info>(
    info: &AccountInfo<'info>,
    owner: &Pubkey,
    position: u32,
    item: SlotBytes,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let position = position.to_le_bytes();
    let seeds: [&[u8]; 3] = [b"slot", owner.as_ref(), &position];
    let bump = expect_pda(info, &seeds)?;

    if info.owner != &crate::ID || info.data_is_empty() {
        create_pda(info, &seeds, bump, IndexSlot::SIZE, payer, system_program)?;
    }

    store_state(info, &IndexSlot { item })
}

/// Item in slot `position` of the list owned by `owner`
pub fn read_slot(info: &AccountInfo, owner: &Pubkey, position: u32) -> Result<SlotBytes> {
    let position = position.to_le_bytes();
    expect_pda(info, &[b"slot", owner.as_ref(), &position])?;

    read_state::<IndexSlot>(info)?
        .map(|slot| slot.item)
        .ok_or(error!(SoulboundError::AccountMismatch))
}

/// Optional account the current operation needs after all
pub fn required<'info>(account: &Option<UncheckedAccount<'info>>) -> Result<AccountInfo<'info>> {
    account
        .as_ref()
        .map(|account| account.to_account_info())
        .ok_or(error!(SoulboundError::AccountMismatch))
}

// =============================================================================
// PAYOUTS
// =============================================================================

/// Lamports that may leave an account holding `balance` while keeping
/// `reserve`. Fails when `amount` is not fully covered.
pub fn payable_amount(balance: u64, reserve: u64, amount: u128) -> Result<u64> {
    let amount = u64::try_from(amount).map_err(|_| error!(SoulboundError::PayoutFailed))?;
    require!(
        amount <= balance.saturating_sub(reserve),
        SoulboundError::PayoutFailed
    );
    Ok(amount)
}

/// Move `amount` lamports from a program-owned account to `recipient`,
/// keeping the source rent exempt.
pub fn pay_out(source: &AccountInfo, recipient: &AccountInfo, amount: u128) -> Result<u64> {
    let reserve = Rent::get()?.minimum_balance(source.data_len());
    let amount = payable_amount(source.lamports(), reserve, amount)?;

    let mut from = source.try_borrow_mut_lamports()?;
    let mut to = recipient.try_borrow_mut_lamports()?;
    **from = (**from)
        .checked_sub(amount)
        .ok_or(error!(SoulboundError::PayoutFailed))?;
    **to = (**to)
        .checked_add(amount)
        .ok_or(error!(SoulboundError::PayoutFailed))?;

    Ok(amount)
}
